//! Detector (b): untested method combinations.
//!
//! Pairs of methods that were never jointly applied to a result, but are
//! semantically compatible and share candidate application areas.

use std::collections::BTreeSet;

use lacuna_core::{CancelToken, NodeType, Result};
use lacuna_embed::EmbeddingIndex;
use lacuna_graph::GraphView;

use crate::detector::GapDetector;
use crate::types::{DiscoveryThresholds, GapRecord, MissingConnection, ResearchPriority};

pub struct UntestedMethodCombos {
    thresholds: DiscoveryThresholds,
}

impl UntestedMethodCombos {
    pub fn new(thresholds: DiscoveryThresholds) -> Self {
        Self { thresholds }
    }

    /// Unordered method pairs already co-adjacent to some result node —
    /// combinations that were jointly applied and need no proposal.
    fn successful_pairs(view: &GraphView) -> BTreeSet<(String, String)> {
        let mut pairs = BTreeSet::new();
        for result in view.nodes_of_type(NodeType::Result) {
            let methods: Vec<&String> = view
                .neighbors(result)
                .iter()
                .filter(|n| view.node(n).map(|node| node.node_type) == Some(NodeType::Method))
                .collect();
            for (i, a) in methods.iter().enumerate() {
                for b in &methods[i + 1..] {
                    pairs.insert(sorted_pair(a, b));
                }
            }
        }
        pairs
    }
}

fn sorted_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl GapDetector for UntestedMethodCombos {
    fn name(&self) -> &'static str {
        "untested_method_combos"
    }

    fn detect(
        &self,
        view: &GraphView,
        embeddings: &EmbeddingIndex,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>> {
        let t = &self.thresholds;
        let methods = view.nodes_of_type(NodeType::Method);
        let successful = Self::successful_pairs(view);
        let mut gaps = Vec::new();

        for (i, a) in methods.iter().enumerate() {
            cancel.checkpoint()?;
            for b in &methods[i + 1..] {
                if successful.contains(&sorted_pair(a, b)) {
                    continue;
                }
                let compatibility = match embeddings.similarity(a, b) {
                    Some(similarity) => similarity.max(0.0),
                    None => t.method_default_compatibility,
                };
                if compatibility <= t.method_compatibility_min {
                    continue;
                }

                let areas: Vec<&str> = view
                    .common_neighbors(a, b)
                    .into_iter()
                    .filter(|id| {
                        matches!(
                            view.node(id).map(|n| n.node_type),
                            Some(NodeType::Pathway | NodeType::Gene | NodeType::Hypothesis)
                        )
                    })
                    .take(t.method_max_areas)
                    .map(|id| view.name(id))
                    .collect();
                if areas.is_empty() {
                    continue;
                }

                gaps.push(GapRecord {
                    hypothesis_text: format!(
                        "Combining {} + {} may yield new insights into {}",
                        view.name(a),
                        view.name(b),
                        areas[0]
                    ),
                    confidence_score: f64::from(compatibility),
                    supporting_evidence: vec![
                        format!("Methods are compatible (score: {compatibility:.2})"),
                        format!("Potential applications: {}", areas.join(", ")),
                    ],
                    missing_connections: vec![MissingConnection::edge(a, b, "COMBINES_WITH")],
                    research_priority: ResearchPriority::Medium,
                    suggested_methods: vec!["Pilot study".into(), "Feasibility analysis".into()],
                });
            }
        }

        Ok(gaps)
    }
}
