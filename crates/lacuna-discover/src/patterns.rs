//! Detector (d): recurring unexplained patterns.
//!
//! Triangles grouped by the sorted triple of member types. A pattern that
//! recurs often, with no hypothesis node covering most of its instances,
//! suggests an ungeneralized mechanism.

use std::collections::BTreeMap;

use lacuna_core::{CancelToken, NodeType, Result};
use lacuna_embed::EmbeddingIndex;
use lacuna_graph::GraphView;

use crate::detector::GapDetector;
use crate::types::{DiscoveryThresholds, GapRecord, MissingConnection, ResearchPriority};

pub struct RecurringPatterns {
    thresholds: DiscoveryThresholds,
}

impl RecurringPatterns {
    pub fn new(thresholds: DiscoveryThresholds) -> Self {
        Self { thresholds }
    }

    /// A pattern is explained when some hypothesis node touches at least
    /// `pattern_coverage` of its instances (an instance counts as covered
    /// if the hypothesis is adjacent to any one member).
    fn has_explaining_hypothesis(
        &self,
        view: &GraphView,
        instances: &[[&str; 3]],
    ) -> bool {
        let needed = instances.len() as f64 * self.thresholds.pattern_coverage;
        for hypothesis in view.nodes_of_type(NodeType::Hypothesis) {
            let covered = instances
                .iter()
                .filter(|tri| tri.iter().any(|member| view.has_edge(hypothesis, member)))
                .count();
            if covered as f64 >= needed {
                return true;
            }
        }
        false
    }
}

impl GapDetector for RecurringPatterns {
    fn name(&self) -> &'static str {
        "recurring_patterns"
    }

    fn detect(
        &self,
        view: &GraphView,
        _embeddings: &EmbeddingIndex,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>> {
        let t = &self.thresholds;

        // Group triangles by their sorted type signature. BTreeMap keeps
        // group iteration deterministic.
        let mut groups: BTreeMap<[String; 3], Vec<[&str; 3]>> = BTreeMap::new();
        for triangle in view.triangles() {
            cancel.checkpoint()?;
            let Some(types) = triangle
                .iter()
                .map(|m| view.node(m).map(|n| n.node_type.to_string()))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let mut signature: [String; 3] = match types.try_into() {
                Ok(s) => s,
                Err(_) => continue,
            };
            signature.sort();
            groups.entry(signature).or_default().push(triangle);
        }

        let mut gaps = Vec::new();
        for (signature, instances) in &groups {
            cancel.checkpoint()?;
            if instances.len() < t.pattern_min_instances {
                continue;
            }
            if self.has_explaining_hypothesis(view, instances) {
                continue;
            }

            let label = signature.join(" + ");
            let examples: Vec<&str> = instances
                .iter()
                .take(3)
                .map(|tri| view.name(tri[0]))
                .collect();

            gaps.push(GapRecord {
                hypothesis_text: format!(
                    "A common mechanism may exist for the {label} pattern in longevity research"
                ),
                confidence_score: (instances.len() as f64 / 10.0).min(t.pattern_confidence_cap),
                supporting_evidence: vec![
                    format!("Pattern recurs {} times", instances.len()),
                    format!("Examples: {}", examples.join(", ")),
                ],
                missing_connections: vec![MissingConnection::pattern(
                    label,
                    instances.len(),
                    "GENERAL_MECHANISM",
                )],
                research_priority: ResearchPriority::Medium,
                suggested_methods: vec![
                    "Meta-analysis".into(),
                    "Systems biology approach".into(),
                    "Pathway analysis".into(),
                ],
            });
        }

        Ok(gaps)
    }
}
