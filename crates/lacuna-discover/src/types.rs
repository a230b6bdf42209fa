//! Gap record types and detection thresholds.

use serde::Serialize;

/// Coarse urgency bucket for a candidate hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchPriority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ResearchPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A structured reference to what is absent from the graph.
///
/// Two shapes exist historically: a concrete edge proposal and a recurring
/// pattern descriptor. Serialized untagged so consumers see either
/// `{source, target, type}` or `{pattern, instances, type}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MissingConnection {
    Edge {
        source: String,
        target: String,
        #[serde(rename = "type")]
        rel_type: String,
    },
    Pattern {
        pattern: String,
        instances: usize,
        #[serde(rename = "type")]
        rel_type: String,
    },
}

impl MissingConnection {
    pub fn edge(
        source: impl Into<String>,
        target: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self::Edge {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>, instances: usize, rel_type: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            instances,
            rel_type: rel_type.into(),
        }
    }
}

/// One candidate research hypothesis surfaced by a detector.
#[derive(Debug, Clone, Serialize)]
pub struct GapRecord {
    /// Human-readable candidate statement.
    #[serde(rename = "potential_hypothesis")]
    pub hypothesis_text: String,
    /// Heuristic ranking signal. Not a probability and not bounded to
    /// [0, 1]; ordering is its only contract.
    pub confidence_score: f64,
    pub supporting_evidence: Vec<String>,
    pub missing_connections: Vec<MissingConnection>,
    pub research_priority: ResearchPriority,
    pub suggested_methods: Vec<String>,
}

/// Numeric knobs of the four detectors. Defaults are the canonical values;
/// strictly-greater comparisons apply everywhere a `min` is named.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryThresholds {
    /// Pathway pairs below or at this similarity are skipped.
    pub pathway_similarity_min: f32,
    /// Above this similarity a pathway gap is high priority.
    pub pathway_high_similarity: f32,
    /// Minimum shared neighbors for a pathway gap.
    pub pathway_min_shared: usize,
    /// Method pairs below or at this compatibility are skipped.
    pub method_compatibility_min: f32,
    /// Compatibility assumed when either embedding is unavailable.
    pub method_default_compatibility: f32,
    /// Application areas reported per method pair.
    pub method_max_areas: usize,
    /// A node is "isolated" at this degree or less.
    pub isolated_max_degree: usize,
    /// Potential scores below or at this are skipped.
    pub isolated_potential_min: f64,
    /// A peer counts as well connected above this degree.
    pub well_connected_min_degree: usize,
    /// Peers below or at this similarity are not "similar".
    pub similar_node_min: f32,
    /// A triangle type-pattern must recur at least this often.
    pub pattern_min_instances: usize,
    /// Share of instances a hypothesis must touch to explain a pattern.
    pub pattern_coverage: f64,
    /// Cap on pattern-gap confidence.
    pub pattern_confidence_cap: f64,
}

impl Default for DiscoveryThresholds {
    fn default() -> Self {
        Self {
            pathway_similarity_min: 0.7,
            pathway_high_similarity: 0.8,
            pathway_min_shared: 2,
            method_compatibility_min: 0.6,
            method_default_compatibility: 0.5,
            method_max_areas: 3,
            isolated_max_degree: 2,
            isolated_potential_min: 0.7,
            well_connected_min_degree: 5,
            similar_node_min: 0.6,
            pattern_min_instances: 3,
            pattern_coverage: 0.7,
            pattern_confidence_cap: 0.9,
        }
    }
}

/// Result of one full analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub gaps: Vec<GapRecord>,
    pub duration_ms: u64,
}
