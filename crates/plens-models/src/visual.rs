//! Visual context from the video-indexing collaborator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::deserialize_seconds;

/// A short semantic description of what is on screen over a time range.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisualMoment {
    /// Start of the described range in seconds
    #[serde(deserialize_with = "deserialize_seconds")]
    pub start_sec: f64,

    /// End of the described range in seconds
    #[serde(deserialize_with = "deserialize_seconds")]
    pub end_sec: f64,

    /// What the indexing service saw ("bar chart of latency results")
    pub description: String,
}

/// The full visual description track for a video. May be absent entirely,
/// in which case the visual-mismatch signal contributes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VisualContext {
    pub moments: Vec<VisualMoment>,
}

impl VisualContext {
    pub fn new(moments: Vec<VisualMoment>) -> Self {
        Self { moments }
    }

    /// Descriptions overlapping the half-open range `[start, end)`.
    pub fn descriptions_in_range(&self, start: f64, end: f64) -> Vec<&str> {
        self.moments
            .iter()
            .filter(|m| m.start_sec < end && m.end_sec > start)
            .map(|m| m.description.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }
}
