//! Visual Mismatch signal.
//!
//! Compares spoken content against the indexing service's visual
//! descriptions for the same time range. The comparison is lexical:
//! the fewer spoken content words that appear anywhere in the on-screen
//! descriptions, the larger the mismatch. Missing visual context degrades
//! the signal to zero contribution, never to an error.

use std::collections::HashSet;

use plens_models::{SignalEvidence, SignalKind, SignalResult, VisualContext, Window, MAX_SEVERITY};

use super::words;

/// Function words excluded from the overlap comparison.
const STOPWORDS: [&str; 24] = [
    "the", "a", "an", "and", "or", "but", "so", "of", "to", "in", "on", "at", "for", "with", "is",
    "are", "was", "were", "it", "this", "that", "we", "you", "our",
];

fn content_words(text: &str) -> HashSet<String> {
    words(text)
        .into_iter()
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Analyze one window against the visual track, if present.
pub fn analyze(window: &Window, visual: Option<&VisualContext>) -> SignalResult {
    let descriptions: Vec<String> = match visual {
        Some(ctx) => ctx
            .descriptions_in_range(window.start_sec, window.end_sec)
            .into_iter()
            .map(|d| d.to_string())
            .collect(),
        None => Vec::new(),
    };

    if descriptions.is_empty() || window.is_silent() {
        return SignalResult::quiet(SignalKind::VisualMismatch);
    }

    let spoken = content_words(&window.text);
    if spoken.is_empty() {
        return SignalResult::quiet(SignalKind::VisualMismatch);
    }

    let shown = content_words(&descriptions.join(" "));
    let matched = spoken.iter().filter(|w| shown.contains(*w)).count();
    let mismatch = 1.0 - matched as f64 / spoken.len() as f64;

    SignalResult::new(
        SignalKind::VisualMismatch,
        MAX_SEVERITY * mismatch,
        SignalEvidence::Visual { descriptions },
    )
}
