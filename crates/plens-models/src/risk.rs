//! Per-window risk score model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The combined risk score for one window, derived from its six signal
/// severities by the risk scorer. Deterministic given identical signals and
/// weights.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WindowRisk {
    /// Window ordinal (ties in risk rank by earliest ordinal)
    pub ordinal: usize,

    /// Window start in seconds
    pub start_sec: f64,

    /// Window end in seconds
    pub end_sec: f64,

    /// Weighted combination of the six severities (0–10 scale)
    pub risk: f64,

    /// Whether risk met the configured flag threshold
    pub flagged: bool,
}

impl WindowRisk {
    pub fn new(ordinal: usize, start_sec: f64, end_sec: f64, risk: f64, flagged: bool) -> Self {
        Self {
            ordinal,
            start_sec,
            end_sec,
            risk: risk.max(0.0),
            flagged,
        }
    }
}
