//! Error types for Lacuna.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Property error: {0}")]
    Property(String),

    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
