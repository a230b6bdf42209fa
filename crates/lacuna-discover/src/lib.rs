//! Lacuna Discover — gap detectors, ranking, and the analysis engine.
//!
//! Given an immutable graph snapshot, four independent detectors surface
//! candidate research hypotheses (missing pathway links, untested method
//! combinations, isolated high-potential nodes, recurring unexplained
//! patterns) which are merged into one confidence-ranked list.

pub mod detector;
pub mod engine;
pub mod isolated;
pub mod methods;
pub mod pathways;
pub mod patterns;
pub mod ranker;
pub mod types;

pub use detector::GapDetector;
pub use engine::GapEngine;
pub use isolated::IsolatedHighPotential;
pub use methods::UntestedMethodCombos;
pub use pathways::MissingPathwayLinks;
pub use patterns::RecurringPatterns;
pub use ranker::rank;
pub use types::{
    AnalysisReport, DiscoveryThresholds, GapRecord, MissingConnection, ResearchPriority,
};
