//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for analysis runs with
//! contextual information (run id, video id, stage).

use tracing::{info, warn, Span};

use plens_models::{RunId, VideoId};

/// Run logger for structured logging with consistent formatting.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    video_id: String,
}

impl RunLogger {
    /// Create a new logger for one analysis run.
    pub fn new(run_id: &RunId, video_id: &VideoId) -> Self {
        Self {
            run_id: run_id.to_string(),
            video_id: video_id.to_string(),
        }
    }

    /// Log the start of a pipeline stage.
    pub fn stage(&self, stage: &str, message: &str) {
        info!(
            run_id = %self.run_id,
            video_id = %self.video_id,
            stage = stage,
            "{}", message
        );
    }

    /// Log a degraded-signal warning.
    pub fn degraded(&self, stage: &str, message: &str) {
        warn!(
            run_id = %self.run_id,
            video_id = %self.video_id,
            stage = stage,
            "{}", message
        );
    }

    /// Get the run ID.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "analysis_run",
            run_id = %self.run_id,
            video_id = %self.video_id
        )
    }
}
