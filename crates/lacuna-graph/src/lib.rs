//! Lacuna Graph — immutable per-analysis view of a graph snapshot.

pub mod cliques;
pub mod view;

pub use cliques::Cliques;
pub use view::GraphView;
