//! In-memory graph view built once per analysis.
//!
//! Edges are stored directed (as ingested) in a petgraph `DiGraph`, but all
//! neighbor/motif queries go through a derived undirected adjacency view:
//! collapsing direction is an intentional design choice for gap detection,
//! not accidental data loss. Neighbor sets are `BTreeSet`s so every
//! iteration over them is deterministic.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use lacuna_core::{Error, GraphSnapshot, Node, NodeType, Result};

use crate::cliques::Cliques;

static EMPTY_NEIGHBORS: BTreeSet<String> = BTreeSet::new();

pub struct GraphView {
    graph: DiGraph<Node, lacuna_core::Edge>,
    node_index: HashMap<String, NodeIndex>,
    /// Node ids in snapshot insertion order.
    ids: Vec<String>,
    /// Undirected adjacency, sorted neighbor sets.
    adjacency: HashMap<String, BTreeSet<String>>,
    /// Node ids per type, snapshot insertion order.
    by_type: HashMap<NodeType, Vec<String>>,
}

impl GraphView {
    /// Build the view from a full snapshot.
    ///
    /// Duplicate node ids make the snapshot unusable and fail the build.
    /// Edges referencing unknown ids, and self loops, are silently dropped:
    /// partial graphs are expected from best-effort upstream extraction.
    pub fn build(snapshot: &GraphSnapshot) -> Result<Self> {
        let mut graph = DiGraph::new();
        let mut node_index = HashMap::with_capacity(snapshot.nodes.len());
        let mut ids = Vec::with_capacity(snapshot.nodes.len());
        let mut adjacency: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut by_type: HashMap<NodeType, Vec<String>> = HashMap::new();

        for node in &snapshot.nodes {
            if node_index.contains_key(&node.id) {
                return Err(Error::Snapshot(format!("duplicate node id: {}", node.id)));
            }
            let idx = graph.add_node(node.clone());
            node_index.insert(node.id.clone(), idx);
            ids.push(node.id.clone());
            adjacency.insert(node.id.clone(), BTreeSet::new());
            by_type.entry(node.node_type).or_default().push(node.id.clone());
        }

        let mut dropped = 0usize;
        for edge in &snapshot.edges {
            let (Some(&src), Some(&dst)) = (
                node_index.get(&edge.source),
                node_index.get(&edge.target),
            ) else {
                dropped += 1;
                continue;
            };
            if src == dst {
                dropped += 1;
                continue;
            }
            graph.add_edge(src, dst, edge.clone());
            adjacency
                .get_mut(&edge.source)
                .unwrap()
                .insert(edge.target.clone());
            adjacency
                .get_mut(&edge.target)
                .unwrap()
                .insert(edge.source.clone());
        }

        if dropped > 0 {
            debug!("Graph view: dropped {} malformed or self-loop edges", dropped);
        }

        Ok(Self {
            graph,
            node_index,
            ids,
            adjacency,
            by_type,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Directed edges retained in the view.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Display name for a node id, falling back to the id itself.
    pub fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id).map(|n| n.name.as_str()).unwrap_or(id)
    }

    /// All node ids, snapshot insertion order.
    pub fn node_ids(&self) -> &[String] {
        &self.ids
    }

    /// Node ids of one type, snapshot insertion order.
    pub fn nodes_of_type(&self, node_type: NodeType) -> &[String] {
        self.by_type
            .get(&node_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Undirected adjacency test.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Sorted undirected neighbor set; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> &BTreeSet<String> {
        self.adjacency.get(id).unwrap_or(&EMPTY_NEIGHBORS)
    }

    /// Sorted intersection of two nodes' neighbor sets.
    pub fn common_neighbors(&self, a: &str, b: &str) -> Vec<&str> {
        self.neighbors(a)
            .intersection(self.neighbors(b))
            .map(String::as_str)
            .collect()
    }

    /// Undirected degree.
    pub fn degree(&self, id: &str) -> usize {
        self.neighbors(id).len()
    }

    /// Lazy, complete enumeration of all cliques (every size, each once).
    pub fn enumerate_cliques(&self) -> Cliques<'_> {
        Cliques::new(self)
    }

    /// Size-3 cliques, in enumeration order.
    pub fn triangles(&self) -> impl Iterator<Item = [&str; 3]> + '_ {
        self.enumerate_cliques().filter_map(|clique| match clique[..] {
            [a, b, c] => Some([a, b, c]),
            _ => None,
        })
    }
}
