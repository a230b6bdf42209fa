//! Typed node and relationship records — the substrate every other
//! component reads.
//!
//! Nodes are created by the ingestion collaborator and are immutable for the
//! duration of one analysis run. The `properties` bag is sparse: consumers
//! read optional keys through the typed accessors and get a documented
//! default (or a typed error for a present-but-wrong-typed value) instead of
//! a lookup failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Closed set of entity kinds tracked in the research graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Gene,
    Pathway,
    Method,
    Researcher,
    Hypothesis,
    Result,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gene => write!(f, "gene"),
            Self::Pathway => write!(f, "pathway"),
            Self::Method => write!(f, "method"),
            Self::Researcher => write!(f, "researcher"),
            Self::Hypothesis => write!(f, "hypothesis"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// A vertex in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable string key, globally unique across all node types.
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display label.
    pub name: String,
    /// Sparse bag: description, mention counts, confidence, affiliation, etc.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Precomputed embedding, when the ingestion side already has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            name: name.into(),
            properties: Map::new(),
            embedding: None,
        }
    }

    /// Builder-style property insert.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// String property, `None` when absent or not a string.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Numeric property. Absent keys are `Ok(None)`; a present value of a
    /// non-numeric type is a `Property` error so detectors can distinguish
    /// "no data" from "invalid data".
    pub fn prop_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.properties.get(key) {
            None => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                Error::Property(format!(
                    "node {}: property {:?} is not numeric: {}",
                    self.id, key, value
                ))
            }),
        }
    }

    /// The `description` property, defaulting to the empty string.
    pub fn description(&self) -> &str {
        self.prop_str("description").unwrap_or("")
    }

    /// Text fed to the embedder: name and description joined by one space.
    pub fn embed_text(&self) -> String {
        format!("{} {}", self.name, self.description())
    }
}

/// A typed, weighted, directed link between two node ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Free-form relation label, e.g. `REGULATES`, `USED_TO_STUDY`.
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Confidence/strength, in [0, 1] by convention (not enforced).
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn default_weight() -> f64 {
    1.0
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        rel_type: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            rel_type: rel_type.into(),
            weight,
            properties: Map::new(),
        }
    }
}

/// Full read-everything-then-analyze input: one graph snapshot per analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}
