//! Transcript models.
//!
//! The transcript is supplied by the video-indexing collaborator after the
//! video finishes processing. It is treated as read-only input: the pipeline
//! never mutates it, and gaps or overlaps between source utterances are
//! valid (rolling captions routinely overlap).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::timestamp::deserialize_seconds;

/// Unique identifier for a source video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single timed utterance from the indexing service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Utterance {
    /// Start time in seconds
    #[serde(deserialize_with = "deserialize_seconds")]
    pub start_sec: f64,

    /// End time in seconds
    #[serde(deserialize_with = "deserialize_seconds")]
    pub end_sec: f64,

    /// Spoken text
    pub text: String,
}

impl Utterance {
    pub fn new(start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.into(),
        }
    }

    /// Whether this utterance overlaps the half-open range `[start, end)`.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_sec < end && self.end_sec > start
    }
}

/// A complete timestamped transcript for one video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transcript {
    /// Source video this transcript belongs to
    pub video_id: VideoId,

    /// Ordered utterances (start times monotonically non-decreasing)
    pub utterances: Vec<Utterance>,
}

impl Transcript {
    /// Create a transcript, normalizing utterance text on ingestion.
    pub fn new(video_id: VideoId, utterances: Vec<Utterance>) -> Self {
        let utterances = utterances
            .into_iter()
            .map(|mut u| {
                u.text = normalize_text(&u.text);
                u
            })
            .collect();
        Self {
            video_id,
            utterances,
        }
    }

    /// Total duration in seconds (end of the last-ending utterance).
    pub fn duration(&self) -> f64 {
        self.utterances
            .iter()
            .map(|u| u.end_sec)
            .fold(0.0, f64::max)
    }

    /// True when there is nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty() || self.duration() <= 0.0
    }

    /// Concatenated text of all utterances overlapping `[start, end)`.
    pub fn text_in_range(&self, start: f64, end: f64) -> String {
        let mut text = String::new();
        for u in self.utterances.iter().filter(|u| u.overlaps(start, end)) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(u.text.trim());
        }
        text
    }
}

/// Normalize transcript text: fix spacing artifacts the indexing service
/// leaves around currency, commas and percent signs, and collapse doubled
/// spaces.
pub fn normalize_text(text: &str) -> String {
    let mut text = text.replace(" ,", ",").replace("$ ", "$").replace(" %", "%");
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text.trim().to_string()
}
