//! Lacuna Core — knowledge-graph entity model, errors, cancellation.

pub mod cancel;
pub mod error;
pub mod model;

pub use cancel::CancelToken;
pub use error::{Error, Result};
pub use model::{Edge, GraphSnapshot, Node, NodeType};
