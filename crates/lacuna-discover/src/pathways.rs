//! Detector (a): missing pathway connections.
//!
//! Two pathways that are semantically close, share targets, and yet have no
//! edge between them are a candidate regulatory link.

use lacuna_core::{CancelToken, NodeType, Result};
use lacuna_embed::EmbeddingIndex;
use lacuna_graph::GraphView;

use crate::detector::GapDetector;
use crate::types::{DiscoveryThresholds, GapRecord, MissingConnection, ResearchPriority};

pub struct MissingPathwayLinks {
    thresholds: DiscoveryThresholds,
}

impl MissingPathwayLinks {
    pub fn new(thresholds: DiscoveryThresholds) -> Self {
        Self { thresholds }
    }
}

impl GapDetector for MissingPathwayLinks {
    fn name(&self) -> &'static str {
        "missing_pathway_links"
    }

    fn detect(
        &self,
        view: &GraphView,
        embeddings: &EmbeddingIndex,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>> {
        let t = &self.thresholds;
        let pathways = view.nodes_of_type(NodeType::Pathway);
        let mut gaps = Vec::new();

        for (i, a) in pathways.iter().enumerate() {
            cancel.checkpoint()?;
            for b in &pathways[i + 1..] {
                if view.has_edge(a, b) {
                    continue;
                }
                // Undefined similarity (blank description, no backend) skips
                // the pair; it is never scored as zero.
                let Some(similarity) = embeddings.similarity(a, b) else {
                    continue;
                };
                if similarity <= t.pathway_similarity_min {
                    continue;
                }
                let shared = view.common_neighbors(a, b);
                if shared.len() < t.pathway_min_shared {
                    continue;
                }

                let shared_names: Vec<&str> =
                    shared.iter().take(3).map(|id| view.name(id)).collect();
                let priority = if similarity > t.pathway_high_similarity {
                    ResearchPriority::High
                } else {
                    ResearchPriority::Medium
                };

                gaps.push(GapRecord {
                    hypothesis_text: format!(
                        "Pathway {} may regulate {} through {} shared targets",
                        view.name(a),
                        view.name(b),
                        shared.len()
                    ),
                    confidence_score: f64::from(similarity) * (shared.len() as f64 / 10.0),
                    supporting_evidence: vec![format!(
                        "Shared targets: {}",
                        shared_names.join(", ")
                    )],
                    missing_connections: vec![MissingConnection::edge(a, b, "REGULATES")],
                    research_priority: priority,
                    suggested_methods: vec![
                        "Pathway enrichment analysis".into(),
                        "Co-expression analysis".into(),
                        "Proteomics".into(),
                    ],
                });
            }
        }

        Ok(gaps)
    }
}
