//! Clarity report models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::issue::Issue;
use crate::transcript::VideoId;

/// Unique identifier for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualitative tier over the 0–100 clarity score.
///
/// The bands form a total, non-overlapping partition of [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClarityTier {
    /// 85–100
    CrystalClear,
    /// 70–84.99
    ClearEnough,
    /// 50–69.99
    Wobbly,
    /// 30–49.99
    Confusing,
    /// 0–29.99
    LostTheRoom,
}

impl ClarityTier {
    /// Band lookup. Scores outside [0, 100] are clamped first.
    pub fn from_score(score: f64) -> Self {
        let score = score.clamp(0.0, 100.0);
        if score >= 85.0 {
            Self::CrystalClear
        } else if score >= 70.0 {
            Self::ClearEnough
        } else if score >= 50.0 {
            Self::Wobbly
        } else if score >= 30.0 {
            Self::Confusing
        } else {
            Self::LostTheRoom
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CrystalClear => "crystal_clear",
            Self::ClearEnough => "clear_enough",
            Self::Wobbly => "wobbly",
            Self::Confusing => "confusing",
            Self::LostTheRoom => "lost_the_room",
        }
    }

    /// Human-readable tier label for display layers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CrystalClear => "Crystal clear",
            Self::ClearEnough => "Clear enough",
            Self::Wobbly => "Wobbly",
            Self::Confusing => "Confusing",
            Self::LostTheRoom => "Lost the room",
        }
    }
}

impl fmt::Display for ClarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The whole-video analysis result. Created once per run and immutable
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClarityReport {
    /// Unique run identifier
    pub run_id: RunId,

    /// Source video identifier
    pub video_id: VideoId,

    /// Overall clarity score, 0–100 (higher is clearer)
    pub clarity_score: f64,

    /// Qualitative tier for the score
    pub clarity_tier: ClarityTier,

    /// Flagged segments in timestamp order
    pub segments: Vec<Issue>,

    /// When the report was created
    pub created_at: DateTime<Utc>,
}

impl ClarityReport {
    /// Create a report, clamping the score into [0, 100].
    pub fn new(run_id: RunId, video_id: VideoId, clarity_score: f64, segments: Vec<Issue>) -> Self {
        let clarity_score = clarity_score.clamp(0.0, 100.0);
        Self {
            run_id,
            video_id,
            clarity_score,
            clarity_tier: ClarityTier::from_score(clarity_score),
            segments,
            created_at: Utc::now(),
        }
    }

    /// A perfect-score report with no segments (zero-duration input).
    pub fn perfect(run_id: RunId, video_id: VideoId) -> Self {
        Self::new(run_id, video_id, 100.0, Vec::new())
    }
}
