//! Whole-video clarity aggregation.
//!
//! Folds every window's risk into one 0-100 clarity score and a
//! qualitative tier. Monotonic: more risk can only lower the score.

use plens_models::{ClarityTier, WindowRisk};

use crate::config::AnalysisConfig;

/// Aggregate all window risks into `(score, tier)`.
///
/// `score = 100 − clamp(mean_risk · scale, 0, 100)`. No windows means
/// nothing confused anyone: a perfect score.
pub fn aggregate_clarity(risks: &[WindowRisk], config: &AnalysisConfig) -> (f64, ClarityTier) {
    if risks.is_empty() {
        return (100.0, ClarityTier::from_score(100.0));
    }

    let mean_risk = risks.iter().map(|r| r.risk).sum::<f64>() / risks.len() as f64;
    let penalty = (mean_risk * config.score_scale).clamp(0.0, 100.0);
    let score = 100.0 - penalty;

    (score, ClarityTier::from_score(score))
}
