//! Grounding Gap signal.
//!
//! For every term surfaced by Concept Spike, checks whether the speaker
//! ever defined it. Runs as a single sequential pass in timestamp order,
//! threading an explicit accumulator: once a term has appeared (defined or
//! not), later windows are never penalized for it again. Grounding is
//! monotonic and never regresses.

use std::collections::HashSet;
use std::time::Duration;

use plens_models::{SignalEvidence, SignalKind, SignalResult, TermExtraction, Window, MAX_SEVERITY};
use plens_reasoning::Reasoning;

use super::delegate;

/// Forward-carried state for the sequential grounding pass.
#[derive(Debug, Default)]
pub struct GroundingState {
    /// Terms surfaced by any earlier window (lowercased)
    seen: HashSet<String>,
    /// Terms that have been defined so far (lowercased)
    defined: HashSet<String>,
}

impl GroundingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of terms surfaced so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

/// Definition phrase patterns for the degraded-service fallback.
fn is_defined_locally(term: &str, text: &str) -> bool {
    let text = text.to_lowercase();
    let term = term.to_lowercase();
    [
        format!("{} is", term),
        format!("{} means", term),
        format!("{} refers to", term),
        format!("{}, which is", term),
        format!("what {}", term),
    ]
    .iter()
    .any(|pattern| text.contains(pattern.as_str()))
}

/// Analyze one window against the accumulated state.
///
/// Only first-appearance terms are checked; the definition check is
/// delegated per term with a local phrase-pattern fallback. Terms defined
/// in this window ground every later window.
pub async fn analyze(
    reasoner: &dyn Reasoning,
    timeout: Duration,
    window: &Window,
    terms: &TermExtraction,
    state: &mut GroundingState,
) -> SignalResult {
    let new_terms: Vec<String> = terms
        .all_terms()
        .into_iter()
        .filter(|t| !state.seen.contains(&t.to_lowercase()))
        .collect();

    if new_terms.is_empty() {
        return SignalResult::quiet(SignalKind::GroundingGap);
    }

    let mut undefined = Vec::new();
    for term in &new_terms {
        let key = term.to_lowercase();
        state.seen.insert(key.clone());

        let defined = delegate(
            timeout,
            "check_definition",
            reasoner.check_definition(term, &window.text),
        )
        .await
        .unwrap_or_else(|| is_defined_locally(term, &window.text));

        if defined {
            state.defined.insert(key);
        } else {
            undefined.push(term.clone());
        }
    }

    let severity = MAX_SEVERITY * undefined.len() as f64 / new_terms.len() as f64;
    SignalResult::new(
        SignalKind::GroundingGap,
        severity,
        SignalEvidence::UngroundedTerms { undefined },
    )
}
