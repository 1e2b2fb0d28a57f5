//! Structure Order signal.
//!
//! Tags each window's discourse role (delegated, in the parallel phase)
//! and penalizes narrative regressions in a sequential pass: once the talk
//! has reached e.g. the demo, dropping back to problem framing costs more
//! the further back it jumps. Forward jumps are free: skipping sections
//! is a style choice, rewinding is a confusion factory.

use plens_models::{RoleTag, SignalEvidence, SignalKind, SignalResult, MAX_SEVERITY};

/// Severity per rank of backward distance.
const REGRESSION_PENALTY: f64 = 2.0;

/// Forward-carried state for the sequential structure pass.
#[derive(Debug, Default)]
pub struct NarrativeState {
    furthest_rank: Option<u8>,
}

impl NarrativeState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Score one window's role against the narrative so far.
pub fn score_role(role: RoleTag, confidence: f64, state: &mut NarrativeState) -> SignalResult {
    let evidence = SignalEvidence::Role { role, confidence };

    let Some(rank) = role.narrative_rank() else {
        // unknown roles are never penalized
        return SignalResult::new(SignalKind::StructureOrder, 0.0, evidence);
    };

    let severity = match state.furthest_rank {
        Some(furthest) if rank < furthest => {
            let distance = (furthest - rank) as f64;
            (REGRESSION_PENALTY * distance).min(MAX_SEVERITY)
        }
        _ => 0.0,
    };

    if state.furthest_rank.map_or(true, |furthest| rank > furthest) {
        state.furthest_rank = Some(rank);
    }

    SignalResult::new(SignalKind::StructureOrder, severity, evidence)
}
