//! Concept Spike signal.
//!
//! Counts the technical terms and acronyms surfaced in one window. Term
//! extraction is delegated to the reasoning service; when it is degraded,
//! a regex approximation (uppercase acronyms plus CamelCase terms) keeps
//! the signal alive. Severity ramps linearly and saturates just past the
//! configured threshold, so "more than N new terms" reads as high.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

use plens_models::{
    SignalEvidence, SignalKind, SignalResult, TermExtraction, Window, MAX_SEVERITY,
};
use plens_reasoning::Reasoning;

use super::delegate;

fn acronym_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap())
}

fn camel_case_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b[A-Z][a-z]+(?:[A-Z][a-z]+)+\b").unwrap())
}

/// Regex approximation of term extraction for degraded runs.
pub fn fallback_terms(text: &str) -> TermExtraction {
    let mut acronyms: Vec<String> = acronym_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    acronyms.sort();
    acronyms.dedup();

    let mut technical_terms: Vec<String> = camel_case_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    technical_terms.sort();
    technical_terms.dedup();

    TermExtraction {
        acronyms,
        technical_terms,
    }
}

/// Severity for a distinct-term count against the configured threshold.
fn severity_for_count(count: usize, threshold: usize) -> f64 {
    MAX_SEVERITY * count as f64 / (threshold + 1) as f64
}

/// Analyze one window.
pub async fn analyze(
    reasoner: &dyn Reasoning,
    timeout: Duration,
    window: &Window,
    threshold: usize,
) -> SignalResult {
    if window.is_silent() {
        return SignalResult::quiet(SignalKind::ConceptSpike);
    }

    let extraction = delegate(timeout, "extract_terms", reasoner.extract_terms(&window.text))
        .await
        .unwrap_or_else(|| fallback_terms(&window.text));

    let count = extraction.all_terms().len();
    SignalResult::new(
        SignalKind::ConceptSpike,
        severity_for_count(count, threshold),
        SignalEvidence::Terms(extraction),
    )
}
