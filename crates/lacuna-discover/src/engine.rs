//! The gap-discovery engine: one batch analysis pass over a snapshot.
//!
//! Constructed with its collaborators injected — an embedding backend and
//! (per call) a graph snapshot — never reached through globals. Each call
//! rebuilds the graph view and embedding index from the current snapshot;
//! nothing is shared across runs.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use lacuna_core::{CancelToken, Error, GraphSnapshot, Result};
use lacuna_embed::{EmbedderBackend, EmbeddingIndex};
use lacuna_graph::GraphView;

use crate::detector::GapDetector;
use crate::isolated::IsolatedHighPotential;
use crate::methods::UntestedMethodCombos;
use crate::pathways::MissingPathwayLinks;
use crate::patterns::RecurringPatterns;
use crate::ranker::rank;
use crate::types::{AnalysisReport, DiscoveryThresholds, GapRecord};

pub struct GapEngine {
    embedder: Arc<dyn EmbedderBackend>,
    thresholds: DiscoveryThresholds,
}

impl GapEngine {
    pub fn new(embedder: Arc<dyn EmbedderBackend>) -> Self {
        Self::with_thresholds(embedder, DiscoveryThresholds::default())
    }

    pub fn with_thresholds(
        embedder: Arc<dyn EmbedderBackend>,
        thresholds: DiscoveryThresholds,
    ) -> Self {
        Self {
            embedder,
            thresholds,
        }
    }

    /// The four strategies, in their fixed ranking-tie-break order.
    fn detectors(&self) -> Vec<Box<dyn GapDetector>> {
        vec![
            Box::new(MissingPathwayLinks::new(self.thresholds)),
            Box::new(UntestedMethodCombos::new(self.thresholds)),
            Box::new(IsolatedHighPotential::new(self.thresholds)),
            Box::new(RecurringPatterns::new(self.thresholds)),
        ]
    }

    /// Run one full analysis and return the ranked gap list.
    ///
    /// The list is fully materialized before returning — batch, not
    /// streaming. A failing detector is logged and contributes nothing;
    /// cancellation aborts the whole call.
    pub fn analyze(
        &self,
        snapshot: &GraphSnapshot,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>> {
        if snapshot.nodes.is_empty() {
            return Ok(Vec::new());
        }

        let view = GraphView::build(snapshot)?;
        cancel.checkpoint()?;

        let embeddings = EmbeddingIndex::new(&snapshot.nodes, Arc::clone(&self.embedder));
        embeddings.warm();
        cancel.checkpoint()?;

        let mut gaps = Vec::new();
        for detector in self.detectors() {
            match detector.detect(&view, &embeddings, cancel) {
                Ok(found) => {
                    debug!("Detector {} emitted {} gaps", detector.name(), found.len());
                    gaps.extend(found);
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => warn!("Detector {} failed: {}", detector.name(), e),
            }
        }

        let ranked = rank(gaps);
        info!(
            "Gap analysis complete: {} nodes, {} edges, {} candidates",
            view.node_count(),
            view.edge_count(),
            ranked.len()
        );
        Ok(ranked)
    }

    /// `analyze` plus snapshot totals and wall time.
    pub fn analyze_report(
        &self,
        snapshot: &GraphSnapshot,
        cancel: &CancelToken,
    ) -> Result<AnalysisReport> {
        let start = Instant::now();
        let gaps = self.analyze(snapshot, cancel)?;
        Ok(AnalysisReport {
            total_nodes: snapshot.nodes.len(),
            total_edges: snapshot.edges.len(),
            gaps,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingConnection, ResearchPriority};
    use lacuna_core::{Edge, Node, NodeType};
    use lacuna_embed::{HashEmbedder, StaticEmbedder};

    fn edge(a: &str, b: &str) -> Edge {
        Edge::new(a, b, "RELATES_TO", 1.0)
    }

    /// Longevity-style fixture exercising two detectors at once: a missing
    /// pathway link (autophagy/mTOR, similarity 0.9, two shared genes) and
    /// an isolated high-potential gene (klotho vs well-connected sirt1).
    fn fixture() -> (GraphSnapshot, Arc<StaticEmbedder>) {
        let mut nodes = vec![
            Node::new("autophagy", NodeType::Pathway, "Autophagy"),
            Node::new("mtor", NodeType::Pathway, "mTOR signaling"),
            Node::new("sirt1", NodeType::Gene, "SIRT1"),
            Node::new("ampk", NodeType::Gene, "AMPK"),
            Node::new("klotho", NodeType::Gene, "KLOTHO")
                .with_property("recent_mentions", 38)
                .with_property("clinical_relevance", 0.8),
        ];
        let mut edges = vec![
            edge("sirt1", "autophagy"),
            edge("sirt1", "mtor"),
            edge("ampk", "autophagy"),
            edge("ampk", "mtor"),
        ];
        for i in 0..4 {
            let id = format!("x{i}");
            nodes.push(Node::new(&id, NodeType::Pathway, format!("Pathway {i}")));
            edges.push(edge("sirt1", &id));
        }

        let embedder = StaticEmbedder::new(4)
            .with("Autophagy ", vec![1.0, 0.0, 0.0, 0.0])
            .with("mTOR signaling ", vec![9.0, 3.0, 3.0, 1.0])
            .with("KLOTHO ", vec![0.0, 1.0, 0.0, 0.0])
            .with("SIRT1 ", vec![0.0, 8.0, 6.0, 0.0]);
        (GraphSnapshot::new(nodes, edges), Arc::new(embedder))
    }

    #[test]
    fn test_empty_graph_returns_empty_list() {
        let engine = GapEngine::new(Arc::new(HashEmbedder::default()));
        let gaps = engine
            .analyze(&GraphSnapshot::default(), &CancelToken::new())
            .unwrap();
        assert!(gaps.is_empty());
    }

    #[test]
    fn test_ranked_output_is_monotonic() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let gaps = engine.analyze(&snapshot, &CancelToken::new()).unwrap();

        assert_eq!(gaps.len(), 2);
        assert!(gaps
            .windows(2)
            .all(|w| w[0].confidence_score >= w[1].confidence_score));
        // Isolated klotho (0.96) outranks the pathway gap (0.18).
        assert_eq!(gaps[0].research_priority, ResearchPriority::High);
        assert!((gaps[0].confidence_score - 0.96).abs() < 1e-9);
        assert!((gaps[1].confidence_score - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_two_runs_are_identical() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let first = engine.analyze(&snapshot, &CancelToken::new()).unwrap();
        let second = engine.analyze(&snapshot, &CancelToken::new()).unwrap();

        let summarize = |gaps: &[GapRecord]| {
            gaps.iter()
                .map(|g| (g.hypothesis_text.clone(), g.confidence_score))
                .collect::<Vec<_>>()
        };
        assert_eq!(summarize(&first), summarize(&second));
    }

    #[test]
    fn test_no_detector_proposes_a_self_pair() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let gaps = engine.analyze(&snapshot, &CancelToken::new()).unwrap();
        for gap in &gaps {
            for connection in &gap.missing_connections {
                if let MissingConnection::Edge { source, target, .. } = connection {
                    assert_ne!(source, target);
                }
            }
        }
    }

    #[test]
    fn test_failing_detector_does_not_abort_others() {
        let (mut snapshot, embedder) = fixture();
        // Isolated-node detector now hits a wrong-typed property and fails;
        // the pathway gap must still come back.
        snapshot.nodes[4]
            .properties
            .insert("clinical_relevance".into(), "very".into());
        let engine = GapEngine::new(embedder);
        let gaps = engine.analyze(&snapshot, &CancelToken::new()).unwrap();

        assert_eq!(gaps.len(), 1);
        assert!((gaps[0].confidence_score - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_token_aborts_the_call() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(
            engine.analyze(&snapshot, &cancel),
            Err(Error::Cancelled)
        ));
    }

    #[test]
    fn test_duplicate_node_id_is_a_snapshot_error() {
        let (mut snapshot, embedder) = fixture();
        snapshot
            .nodes
            .push(Node::new("sirt1", NodeType::Gene, "SIRT1 again"));
        let engine = GapEngine::new(embedder);
        assert!(matches!(
            engine.analyze(&snapshot, &CancelToken::new()),
            Err(Error::Snapshot(_))
        ));
    }

    #[test]
    fn test_report_carries_totals_and_gaps() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let report = engine
            .analyze_report(&snapshot, &CancelToken::new())
            .unwrap();
        assert_eq!(report.total_nodes, snapshot.nodes.len());
        assert_eq!(report.total_edges, snapshot.edges.len());
        assert_eq!(report.gaps.len(), 2);
    }

    #[test]
    fn test_output_serializes_to_the_wire_contract() {
        let (snapshot, embedder) = fixture();
        let engine = GapEngine::new(embedder);
        let gaps = engine.analyze(&snapshot, &CancelToken::new()).unwrap();
        let json = serde_json::to_value(&gaps).unwrap();

        let first = &json[0];
        for field in [
            "potential_hypothesis",
            "confidence_score",
            "supporting_evidence",
            "missing_connections",
            "research_priority",
            "suggested_methods",
        ] {
            assert!(first.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json[1]["missing_connections"][0]["type"], "REGULATES");
    }
}
