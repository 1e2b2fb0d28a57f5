//! Reasoning client error types.

use thiserror::Error;

pub type ReasoningResult<T> = Result<T, ReasoningError>;

#[derive(Debug, Error)]
pub enum ReasoningError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Reasoning API error: {0}")]
    ApiError(String),

    #[error("Invalid reasoning response: {0}")]
    InvalidResponse(String),

    #[error("Reasoning service unavailable")]
    Unavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ReasoningError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Whether retrying the same call may succeed.
    ///
    /// Malformed responses are not retried: the model already answered and
    /// the caller's deterministic fallback is the better recovery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ApiError(_) | Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryability() {
        assert!(ReasoningError::api_error("503").is_retryable());
        assert!(!ReasoningError::invalid_response("bad json").is_retryable());
        assert!(!ReasoningError::Unavailable.is_retryable());
        assert!(!ReasoningError::config_error("no key").is_retryable());
    }
}
