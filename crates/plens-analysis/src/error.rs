//! Analysis pipeline error types.
//!
//! Collaborator failures (reasoning timeouts, missing visual context) are
//! recovered inside the extractors and never surface here. What remains is
//! fatal and reported before any processing starts: bad configuration and
//! missing required input.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Required input missing: {0}")]
    MissingInput(String),
}

impl AnalysisError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }
}
