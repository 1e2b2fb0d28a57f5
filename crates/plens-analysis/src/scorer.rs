//! Risk scoring.
//!
//! Combines a window's six signal severities into one risk score via a
//! configurable weighted mean, kept separate from extraction so weight
//! tuning is testable without any network-dependent extractor. The math is
//! deterministic: identical signals and weights always produce identical
//! risk.

use plens_models::{Severity, SignalResult, Window, WindowRisk};

use crate::config::AnalysisConfig;

/// Scale factor from the 0-5 weighted-mean severity to the 0-10 risk scale.
const RISK_SCALE: f64 = 2.0;

/// Combine one window's signal results into a risk score and flag decision.
pub fn score_window(
    window: &Window,
    signals: &[SignalResult],
    config: &AnalysisConfig,
) -> WindowRisk {
    let total_weight = config.weights.total();
    let weighted_sum: f64 = signals
        .iter()
        .map(|s| config.weights.weight_for(s.kind) * s.severity)
        .sum();

    let risk = RISK_SCALE * weighted_sum / total_weight;
    let flagged = risk >= config.flag_threshold;

    WindowRisk::new(window.ordinal, window.start_sec, window.end_sec, risk, flagged)
}

/// Severity tier for a flagged window's risk score.
///
/// The flagged range partitions into low / medium / high; config validation
/// guarantees the thresholds are strictly increasing.
pub fn severity_for_risk(risk: f64, config: &AnalysisConfig) -> Severity {
    if risk >= config.high_threshold {
        Severity::High
    } else if risk >= config.medium_threshold {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Order risks for a fixed ranking (e.g. "top N issues"): highest risk
/// first, ties broken by earliest ordinal.
pub fn rank_windows(risks: &mut [WindowRisk]) {
    risks.sort_by(|a, b| {
        b.risk
            .partial_cmp(&a.risk)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.ordinal.cmp(&b.ordinal))
    });
}
