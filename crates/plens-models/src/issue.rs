//! User-facing issue models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::signal::SignalKind;

/// Severity tier of a flagged segment, derived from its risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The same feedback rendered in three tones. Every tone is guaranteed
/// non-empty: the synthesizer falls back to templated text when generation
/// fails rather than leaving a tone blank.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToneVariants {
    /// Sugar-coated, encouraging, mentor-like
    pub kind: String,

    /// Straightforward, professional, direct
    pub honest: String,

    /// Witty three-line roast: punchline, callout, verbatim fix
    pub brutal: String,
}

impl ToneVariants {
    /// True when all three tones carry text.
    pub fn is_complete(&self) -> bool {
        !self.kind.trim().is_empty()
            && !self.honest.trim().is_empty()
            && !self.brutal.trim().is_empty()
    }
}

/// A clarity issue generated for one flagged window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    /// Stable identifier tied to the window ordinal (`seg-NNNN`), unique
    /// within a run
    pub segment_id: String,

    /// Exact window start in seconds
    pub start_sec: f64,

    /// Exact window end in seconds
    pub end_sec: f64,

    /// The window's risk score
    pub risk: f64,

    /// Severity tier derived from the risk score
    pub severity: Severity,

    /// Short catchy label ("Buzzword Overdose")
    pub label: String,

    /// What went wrong, one or two sentences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Concrete one-sentence fix, always non-empty
    pub fix: String,

    /// Feedback in all three tones
    pub tone: ToneVariants,

    /// Signals that triggered this issue, dominant first
    pub signals: Vec<SignalKind>,
}

impl Issue {
    /// Build the stable segment id for a window ordinal.
    pub fn segment_id_for(ordinal: usize) -> String {
        format!("seg-{:04}", ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_id_format() {
        assert_eq!(Issue::segment_id_for(0), "seg-0000");
        assert_eq!(Issue::segment_id_for(42), "seg-0042");
    }

    #[test]
    fn test_tone_completeness() {
        let full = ToneVariants {
            kind: "nice try".into(),
            honest: "needs work".into(),
            brutal: "ouch".into(),
        };
        assert!(full.is_complete());

        let hollow = ToneVariants {
            kind: "nice try".into(),
            honest: "  ".into(),
            brutal: "ouch".into(),
        };
        assert!(!hollow.is_complete());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }
}
