//! Transcript windowing.
//!
//! Splits a transcript into contiguous fixed-width windows covering exactly
//! `[0, total_duration)`. Utterances straddling a boundary contribute their
//! text to every window they overlap; extractors work on a superset of the
//! slice's speech, not a strict partition. Silent windows still exist so the
//! window sequence has no gaps.

use plens_models::{Transcript, Window};

use crate::error::{AnalysisError, AnalysisResult};

/// Split a transcript into analysis windows of `window_secs` width.
///
/// The window count is `ceil(duration / window_secs)`; the final window may
/// be shorter than nominal. Errors on an empty transcript or a non-positive
/// width (both configuration errors, reported before any processing).
pub fn build_windows(transcript: &Transcript, window_secs: f64) -> AnalysisResult<Vec<Window>> {
    if !window_secs.is_finite() || window_secs <= 0.0 {
        return Err(AnalysisError::config_error(format!(
            "window width must be positive, got {}",
            window_secs
        )));
    }

    let duration = transcript.duration();
    if transcript.utterances.is_empty() || duration <= 0.0 {
        return Err(AnalysisError::missing_input(
            "transcript has no utterances to analyze",
        ));
    }

    let count = (duration / window_secs).ceil() as usize;
    let mut windows = Vec::with_capacity(count);

    for ordinal in 0..count {
        let start = ordinal as f64 * window_secs;
        let end = (start + window_secs).min(duration);
        let text = transcript.text_in_range(start, end);
        windows.push(Window::new(ordinal, start, end, text));
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plens_models::{Utterance, VideoId};

    fn transcript(utterances: Vec<Utterance>) -> Transcript {
        Transcript::new(VideoId::from("vid-test"), utterances)
    }

    #[test]
    fn test_windows_partition_duration() {
        let t = transcript(vec![
            Utterance::new(0.0, 12.0, "first"),
            Utterance::new(12.0, 25.0, "second"),
        ]);
        let windows = build_windows(&t, 10.0).unwrap();

        // count = ceil(25 / 10) = 3
        assert_eq!(windows.len(), 3);

        // no gaps, no overlaps, covers [0, duration)
        assert_eq!(windows[0].start_sec, 0.0);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_sec, pair[1].start_sec);
        }
        assert_eq!(windows.last().unwrap().end_sec, 25.0);

        // ordinals are sequential
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.ordinal, i);
        }
    }

    #[test]
    fn test_final_window_is_short() {
        let t = transcript(vec![Utterance::new(0.0, 25.0, "talk")]);
        let windows = build_windows(&t, 10.0).unwrap();
        assert_eq!(windows[2].start_sec, 20.0);
        assert_eq!(windows[2].end_sec, 25.0);
        assert_eq!(windows[2].duration(), 5.0);
    }

    #[test]
    fn test_straddling_utterance_lands_in_both_windows() {
        let t = transcript(vec![
            Utterance::new(0.0, 8.0, "intro"),
            Utterance::new(8.0, 14.0, "straddler"),
            Utterance::new(14.0, 20.0, "outro"),
        ]);
        let windows = build_windows(&t, 10.0).unwrap();

        assert_eq!(windows.len(), 2);
        assert!(windows[0].text.contains("straddler"));
        assert!(windows[1].text.contains("straddler"));
        assert!(!windows[1].text.contains("intro"));
    }

    #[test]
    fn test_silent_window_exists() {
        // speech at [0, 5) and [25, 30): window 1 and 2 are silent or partial
        let t = transcript(vec![
            Utterance::new(0.0, 5.0, "hello"),
            Utterance::new(25.0, 30.0, "goodbye"),
        ]);
        let windows = build_windows(&t, 10.0).unwrap();

        assert_eq!(windows.len(), 3);
        assert!(windows[1].is_silent());
        assert!(!windows[2].is_silent());
    }

    #[test]
    fn test_exact_multiple_duration() {
        let t = transcript(vec![Utterance::new(0.0, 30.0, "talk")]);
        let windows = build_windows(&t, 10.0).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows.last().unwrap().end_sec, 30.0);
    }

    #[test]
    fn test_rejects_bad_width() {
        let t = transcript(vec![Utterance::new(0.0, 10.0, "talk")]);
        assert!(matches!(
            build_windows(&t, 0.0),
            Err(AnalysisError::ConfigError(_))
        ));
        assert!(matches!(
            build_windows(&t, -1.0),
            Err(AnalysisError::ConfigError(_))
        ));
    }

    #[test]
    fn test_rejects_empty_transcript() {
        let t = transcript(vec![]);
        assert!(matches!(
            build_windows(&t, 10.0),
            Err(AnalysisError::MissingInput(_))
        ));
    }

    #[test]
    fn test_source_gaps_and_overlaps_are_valid() {
        // overlapping rolling captions and a gap between utterances
        let t = transcript(vec![
            Utterance::new(0.0, 6.0, "caption one"),
            Utterance::new(4.0, 9.0, "caption two"),
            Utterance::new(15.0, 18.0, "after a gap"),
        ]);
        let windows = build_windows(&t, 10.0).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].text, "caption one caption two");
    }
}
