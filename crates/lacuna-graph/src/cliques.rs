//! Complete clique enumeration over the undirected view.
//!
//! Yields every clique exactly once, breadth-first by size: all single
//! nodes, then all adjacent pairs, then triangles, and so on. Enumeration is
//! exhaustive, never sampled, so downstream pattern frequencies are exact.
//! Cost is acceptable for the graphs this engine targets (hundreds to low
//! thousands of nodes); callers wanting triangles only filter on size 3.

use std::collections::VecDeque;

use crate::view::GraphView;

pub struct Cliques<'a> {
    ids: &'a [String],
    /// Index-based adjacency, each list sorted ascending.
    adj: Vec<Vec<usize>>,
    /// (clique members, extension candidates with a larger index than every
    /// member, each adjacent to all members).
    queue: VecDeque<(Vec<usize>, Vec<usize>)>,
}

impl<'a> Cliques<'a> {
    pub(crate) fn new(view: &'a GraphView) -> Self {
        let ids = view.node_ids();
        let index_of: std::collections::HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        for (i, id) in ids.iter().enumerate() {
            let mut neighbors: Vec<usize> = view
                .neighbors(id)
                .iter()
                .filter_map(|n| index_of.get(n.as_str()).copied())
                .collect();
            neighbors.sort_unstable();
            adj[i] = neighbors;
        }

        let queue: VecDeque<_> = (0..ids.len())
            .map(|u| {
                let candidates: Vec<usize> =
                    adj[u].iter().copied().filter(|&v| v > u).collect();
                (vec![u], candidates)
            })
            .collect();

        Self { ids, adj, queue }
    }
}

impl<'a> Iterator for Cliques<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let (base, candidates) = self.queue.pop_front()?;

        for (i, &v) in candidates.iter().enumerate() {
            let mut extended = base.clone();
            extended.push(v);
            let narrowed: Vec<usize> = candidates[i + 1..]
                .iter()
                .copied()
                .filter(|w| self.adj[v].binary_search(w).is_ok())
                .collect();
            self.queue.push_back((extended, narrowed));
        }

        let ids = self.ids;
        Some(base.iter().map(|&i| ids[i].as_str()).collect())
    }
}
