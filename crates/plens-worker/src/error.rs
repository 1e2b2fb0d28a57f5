//! Worker error types.
//!
//! The worker either completes with a full report or fails with one
//! explicit error naming the input that was missing or malformed.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Required input missing: {0}")]
    MissingInput(String),

    #[error("Failed to read {name}: {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {name}: {source}")]
    ParseFailed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write report: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Analysis error: {0}")]
    Analysis(#[from] plens_analysis::AnalysisError),
}

impl WorkerError {
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }
}
