//! Detector (c): isolated high-potential nodes.
//!
//! Sparsely connected genes, pathways, and methods whose metadata suggests
//! they matter more than their degree shows, paired with well-connected
//! peers of the same type they resemble.

use lacuna_core::{CancelToken, Node, NodeType, Result};
use lacuna_embed::EmbeddingIndex;
use lacuna_graph::GraphView;

use crate::detector::GapDetector;
use crate::types::{DiscoveryThresholds, GapRecord, MissingConnection, ResearchPriority};

pub struct IsolatedHighPotential {
    thresholds: DiscoveryThresholds,
}

impl IsolatedHighPotential {
    pub fn new(thresholds: DiscoveryThresholds) -> Self {
        Self { thresholds }
    }

    /// Research-potential score: 0.5 base, bumped by recent literature
    /// mentions and clinical relevance when those properties exist, capped
    /// at 1.0. Wrong-typed properties are an error, not a silent zero.
    fn research_potential(node: &Node) -> Result<f64> {
        let mut score = 0.5;
        if let Some(mentions) = node.prop_f64("recent_mentions")? {
            score += (mentions / 100.0).min(0.3);
        }
        if let Some(relevance) = node.prop_f64("clinical_relevance")? {
            score += relevance * 0.2;
        }
        Ok(score.min(1.0))
    }

    /// Same-type, well-connected, semantically similar peers, best first.
    fn similar_well_connected<'a>(
        &self,
        view: &'a GraphView,
        embeddings: &EmbeddingIndex,
        id: &str,
        node_type: NodeType,
    ) -> Vec<(&'a str, f32)> {
        let t = &self.thresholds;
        let mut peers: Vec<(&str, f32)> = view
            .nodes_of_type(node_type)
            .iter()
            .filter(|other| other.as_str() != id)
            .filter(|other| view.degree(other) > t.well_connected_min_degree)
            .filter_map(|other| {
                let similarity = embeddings.similarity(id, other)?;
                (similarity > t.similar_node_min).then_some((other.as_str(), similarity))
            })
            .collect();
        // Stable sort keeps insertion order among equally similar peers.
        peers.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        peers.truncate(3);
        peers
    }
}

impl GapDetector for IsolatedHighPotential {
    fn name(&self) -> &'static str {
        "isolated_high_potential"
    }

    fn detect(
        &self,
        view: &GraphView,
        embeddings: &EmbeddingIndex,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>> {
        let t = &self.thresholds;
        let mut gaps = Vec::new();

        for id in view.node_ids() {
            cancel.checkpoint()?;
            let Some(node) = view.node(id) else { continue };
            if !matches!(
                node.node_type,
                NodeType::Gene | NodeType::Pathway | NodeType::Method
            ) {
                continue;
            }
            if view.degree(id) > t.isolated_max_degree {
                continue;
            }

            let potential = Self::research_potential(node)?;
            if potential <= t.isolated_potential_min {
                continue;
            }

            let peers = self.similar_well_connected(view, embeddings, id, node.node_type);
            let Some(&(best, _)) = peers.first() else {
                continue;
            };

            let peer_names: Vec<&str> = peers.iter().take(2).map(|(p, _)| view.name(p)).collect();
            gaps.push(GapRecord {
                hypothesis_text: format!(
                    "{} may play an important role in longevity, similar to {}",
                    node.name,
                    view.name(best)
                ),
                confidence_score: potential,
                supporting_evidence: vec![
                    format!("High research potential (score: {potential:.2})"),
                    format!("Similar well-studied nodes: {}", peer_names.join(", ")),
                ],
                missing_connections: vec![MissingConnection::edge(id, best, "SIMILAR_FUNCTION")],
                research_priority: ResearchPriority::High,
                suggested_methods: vec![
                    "Literature review".into(),
                    "Functional analysis".into(),
                    "Comparative study".into(),
                ],
            });
        }

        Ok(gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use lacuna_core::{Edge, Error, GraphSnapshot};
    use lacuna_embed::StaticEmbedder;

    fn edge(a: &str, b: &str) -> Edge {
        Edge::new(a, b, "RELATES_TO", 1.0)
    }

    /// `klotho` is a degree-1 gene with strong metadata; `sirt1` is a
    /// well-connected gene (degree 6) it resembles.
    fn fixture() -> GraphSnapshot {
        let mut nodes = vec![
            Node::new("klotho", NodeType::Gene, "KLOTHO")
                .with_property("recent_mentions", 38)
                .with_property("clinical_relevance", 0.8),
            Node::new("sirt1", NodeType::Gene, "SIRT1"),
            Node::new("anchor", NodeType::Pathway, "Anchor pathway"),
        ];
        let mut edges = vec![edge("klotho", "anchor")];
        for i in 0..6 {
            let id = format!("p{i}");
            nodes.push(Node::new(&id, NodeType::Pathway, format!("Pathway {i}")));
            edges.push(edge("sirt1", &id));
        }
        GraphSnapshot::new(nodes, edges)
    }

    fn embedder() -> Arc<StaticEmbedder> {
        Arc::new(
            StaticEmbedder::new(4)
                .with("KLOTHO ", vec![1.0, 0.0, 0.0, 0.0])
                .with("SIRT1 ", vec![8.0, 6.0, 0.0, 0.0]),
        )
    }

    fn detect(snapshot: &GraphSnapshot, embedder: Arc<StaticEmbedder>) -> Result<Vec<GapRecord>> {
        let view = GraphView::build(snapshot).unwrap();
        let index = EmbeddingIndex::new(&snapshot.nodes, embedder);
        IsolatedHighPotential::new(DiscoveryThresholds::default()).detect(
            &view,
            &index,
            &CancelToken::new(),
        )
    }

    #[test]
    fn test_isolated_gene_is_surfaced() {
        let gaps = detect(&fixture(), embedder()).unwrap();
        assert_eq!(gaps.len(), 1);
        let gap = &gaps[0];
        // 0.5 + min(0.3, 38/100) + 0.8 * 0.2 = 0.5 + 0.3 + 0.16 — the
        // mentions bump saturates at 0.3.
        assert!((gap.confidence_score - 0.96).abs() < 1e-9);
        assert_eq!(gap.research_priority, ResearchPriority::High);
        assert_eq!(
            gap.missing_connections,
            vec![MissingConnection::edge("klotho", "sirt1", "SIMILAR_FUNCTION")]
        );
        assert!(gap.hypothesis_text.starts_with("KLOTHO"));
        assert!(gap.supporting_evidence[1].contains("SIRT1"));
    }

    #[test]
    fn test_plain_metadata_stays_below_floor() {
        let mut snapshot = fixture();
        snapshot.nodes[0].properties.clear();
        // Base score 0.5 alone never clears the 0.7 floor.
        assert!(detect(&snapshot, embedder()).unwrap().is_empty());
    }

    #[test]
    fn test_well_connected_node_is_not_isolated() {
        let mut snapshot = fixture();
        for i in 0..3 {
            snapshot.edges.push(edge("klotho", &format!("p{i}")));
        }
        assert!(detect(&snapshot, embedder()).unwrap().is_empty());
    }

    #[test]
    fn test_peer_must_be_well_connected() {
        let mut snapshot = fixture();
        // Drop sirt1 to degree 5 — no longer above the floor.
        snapshot
            .edges
            .retain(|e| !(e.source == "sirt1" && e.target == "p5"));
        assert!(detect(&snapshot, embedder()).unwrap().is_empty());
    }

    #[test]
    fn test_dissimilar_peer_is_not_proposed() {
        let orthogonal = Arc::new(
            StaticEmbedder::new(4)
                .with("KLOTHO ", vec![1.0, 0.0, 0.0, 0.0])
                .with("SIRT1 ", vec![0.0, 1.0, 0.0, 0.0]),
        );
        assert!(detect(&fixture(), orthogonal).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_typed_property_fails_detector() {
        let mut snapshot = fixture();
        snapshot.nodes[0]
            .properties
            .insert("clinical_relevance".into(), "very high".into());
        assert!(matches!(
            detect(&snapshot, embedder()),
            Err(Error::Property(_))
        ));
    }

    #[test]
    fn test_best_peer_wins_on_similarity() {
        let mut snapshot = fixture();
        // A second well-connected gene, more similar than sirt1.
        snapshot
            .nodes
            .push(Node::new("foxo3", NodeType::Gene, "FOXO3"));
        for i in 0..6 {
            snapshot.edges.push(edge("foxo3", &format!("p{i}")));
        }
        let embedder = Arc::new(
            StaticEmbedder::new(4)
                .with("KLOTHO ", vec![1.0, 0.0, 0.0, 0.0])
                .with("SIRT1 ", vec![8.0, 6.0, 0.0, 0.0])
                .with("FOXO3 ", vec![9.0, 3.0, 3.0, 1.0]),
        );
        let gaps = detect(&snapshot, embedder).unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(
            gaps[0].missing_connections,
            vec![MissingConnection::edge("klotho", "foxo3", "SIMILAR_FUNCTION")]
        );
        // Evidence lists both peers, best first.
        assert_eq!(
            gaps[0].supporting_evidence[1],
            "Similar well-studied nodes: FOXO3, SIRT1"
        );
    }
}
