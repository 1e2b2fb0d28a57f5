//! Ramble Ratio signal.
//!
//! Purely local and deterministic: measures filler-word density and
//! information density from the window text alone. This signal has no
//! network dependency and keeps producing real severities when every
//! delegated extractor is down.

use plens_models::{SignalEvidence, SignalKind, SignalResult, Window, MAX_SEVERITY};

use super::words;

/// Single-token filler words.
const FILLER_WORDS: [&str; 6] = ["um", "uh", "like", "basically", "actually", "literally"];

/// Two-token filler phrases, matched on consecutive tokens.
const FILLER_PHRASES: [(&str, &str); 4] = [
    ("you", "know"),
    ("kind", "of"),
    ("sort", "of"),
    ("i", "mean"),
];

/// Filler ratio at which the filler component saturates.
const FILLER_SATURATION: f64 = 0.15;

/// Analyze one window. Identical text always yields an identical result.
pub fn analyze(window: &Window) -> SignalResult {
    let tokens = words(&window.text);
    if tokens.is_empty() {
        return SignalResult::quiet(SignalKind::RambleRatio);
    }

    let total = tokens.len();
    let mut is_filler = vec![false; total];

    // Phrase fillers first so "you know" doesn't count "know" as content.
    let mut i = 0;
    while i + 1 < total {
        let pair = (tokens[i].as_str(), tokens[i + 1].as_str());
        if FILLER_PHRASES.contains(&pair) {
            is_filler[i] = true;
            is_filler[i + 1] = true;
            i += 2;
        } else {
            i += 1;
        }
    }
    for (i, token) in tokens.iter().enumerate() {
        if FILLER_WORDS.contains(&token.as_str()) {
            is_filler[i] = true;
        }
    }

    let filler_count = is_filler.iter().filter(|&&f| f).count();
    let filler_ratio = filler_count as f64 / total as f64;

    let distinct_content: std::collections::HashSet<&str> = tokens
        .iter()
        .zip(is_filler.iter())
        .filter(|(_, &filler)| !filler)
        .map(|(t, _)| t.as_str())
        .collect();
    let info_density = distinct_content.len() as f64 / total as f64;

    let filler_component = (filler_ratio / FILLER_SATURATION).min(1.0);
    let severity = MAX_SEVERITY * (0.5 * filler_component + 0.5 * (1.0 - info_density));

    SignalResult::new(SignalKind::RambleRatio, severity, SignalEvidence::None)
}
