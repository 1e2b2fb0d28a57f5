//! Analysis window model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A fixed-width time slice of the transcript, the unit of analysis.
///
/// Windows are contiguous and non-overlapping over `[0, total_duration)`.
/// An utterance that straddles a boundary contributes its text to every
/// window it overlaps, so window text is a superset of what was spoken in
/// the slice, not a strict partition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Window {
    /// Zero-based position in the window sequence
    pub ordinal: usize,

    /// Start of the slice in seconds (inclusive)
    pub start_sec: f64,

    /// End of the slice in seconds (exclusive)
    pub end_sec: f64,

    /// Concatenated text of all overlapping utterances (may be empty for
    /// silent windows)
    pub text: String,
}

impl Window {
    pub fn new(ordinal: usize, start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            start_sec,
            end_sec,
            text: text.into(),
        }
    }

    /// Slice duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_sec - self.start_sec
    }

    /// True when no speech overlaps this window.
    pub fn is_silent(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_duration() {
        let w = Window::new(2, 20.0, 30.0, "some text");
        assert_eq!(w.duration(), 10.0);
        assert!(!w.is_silent());
    }

    #[test]
    fn test_silent_window() {
        let w = Window::new(0, 0.0, 10.0, "  ");
        assert!(w.is_silent());
    }
}
