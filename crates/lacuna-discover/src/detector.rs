//! Detector strategy trait.
//!
//! Each detector scans the shared immutable view for one class of gap.
//! Detectors never mutate shared state and never see each other's output,
//! so the engine may run them in any order; one failing must not abort the
//! rest.

use lacuna_core::{CancelToken, Result};
use lacuna_embed::EmbeddingIndex;
use lacuna_graph::GraphView;

use crate::types::GapRecord;

pub trait GapDetector {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// Scan the view and emit zero or more gap records, in emission order.
    fn detect(
        &self,
        view: &GraphView,
        embeddings: &EmbeddingIndex,
        cancel: &CancelToken,
    ) -> Result<Vec<GapRecord>>;
}
