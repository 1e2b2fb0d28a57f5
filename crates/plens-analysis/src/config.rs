//! Analysis configuration.

use std::time::Duration;

use plens_models::SignalKind;

use crate::error::{AnalysisError, AnalysisResult};

/// Per-signal weights for the risk combination.
///
/// Ramble Ratio and Grounding Gap carry extra weight by default: they keep
/// producing real severities when the delegated extractors are degraded, so
/// they dominate the score in practice.
#[derive(Debug, Clone)]
pub struct SignalWeights {
    pub concept_spike: f64,
    pub grounding_gap: f64,
    pub trust_me_bro: f64,
    pub visual_mismatch: f64,
    pub structure_order: f64,
    pub ramble_ratio: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            concept_spike: 1.0,
            grounding_gap: 2.0,
            trust_me_bro: 1.0,
            visual_mismatch: 1.0,
            structure_order: 1.0,
            ramble_ratio: 2.0,
        }
    }
}

impl SignalWeights {
    /// Weight for one signal.
    pub fn weight_for(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::ConceptSpike => self.concept_spike,
            SignalKind::GroundingGap => self.grounding_gap,
            SignalKind::TrustMeBro => self.trust_me_bro,
            SignalKind::VisualMismatch => self.visual_mismatch,
            SignalKind::StructureOrder => self.structure_order,
            SignalKind::RambleRatio => self.ramble_ratio,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        SignalKind::ALL
            .iter()
            .map(|kind| self.weight_for(*kind))
            .sum()
    }

    fn validate(&self) -> AnalysisResult<()> {
        for kind in SignalKind::ALL {
            let w = self.weight_for(kind);
            if !w.is_finite() || w < 0.0 {
                return Err(AnalysisError::config_error(format!(
                    "weight for {} must be a non-negative number, got {}",
                    kind, w
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(AnalysisError::config_error(
                "at least one signal weight must be positive",
            ));
        }
        Ok(())
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Analysis window width in seconds
    pub window_secs: f64,

    /// Distinct terms in one window above which Concept Spike saturates
    pub new_term_threshold: usize,

    /// Per-signal weights for risk combination
    pub weights: SignalWeights,

    /// Risk at or above which a window is flagged (0-10 scale)
    pub flag_threshold: f64,

    /// Risk at or above which a flagged window is at least medium severity
    pub medium_threshold: f64,

    /// Risk at or above which a flagged window is high severity
    pub high_threshold: f64,

    /// Multiplier from mean window risk to clarity-score penalty
    pub score_scale: f64,

    /// Maximum concurrent delegated reasoning calls
    pub max_reasoning_parallel: usize,

    /// Per-call timeout for delegated reasoning
    pub reasoning_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_secs: 10.0,
            new_term_threshold: 3,
            weights: SignalWeights::default(),
            flag_threshold: 4.0,
            medium_threshold: 4.5,
            high_threshold: 5.5,
            score_scale: 10.0,
            max_reasoning_parallel: 4,
            reasoning_timeout: Duration::from_secs(20),
        }
    }
}

impl AnalysisConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_secs: env_parse("PLENS_WINDOW_SECS", defaults.window_secs),
            new_term_threshold: env_parse("PLENS_NEW_TERM_THRESHOLD", defaults.new_term_threshold),
            weights: SignalWeights::default(),
            flag_threshold: env_parse("PLENS_FLAG_THRESHOLD", defaults.flag_threshold),
            medium_threshold: env_parse("PLENS_MEDIUM_THRESHOLD", defaults.medium_threshold),
            high_threshold: env_parse("PLENS_HIGH_THRESHOLD", defaults.high_threshold),
            score_scale: env_parse("PLENS_SCORE_SCALE", defaults.score_scale),
            max_reasoning_parallel: env_parse(
                "PLENS_MAX_REASONING_PARALLEL",
                defaults.max_reasoning_parallel,
            ),
            reasoning_timeout: Duration::from_secs(env_parse(
                "PLENS_REASONING_TIMEOUT_SECS",
                defaults.reasoning_timeout.as_secs(),
            )),
        }
    }

    /// Validate the configuration. Called by the pipeline before any
    /// processing; violations are fatal.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(AnalysisError::config_error(format!(
                "window width must be positive, got {}",
                self.window_secs
            )));
        }
        if !self.flag_threshold.is_finite() || self.flag_threshold < 0.0 {
            return Err(AnalysisError::config_error(format!(
                "flag threshold must be non-negative, got {}",
                self.flag_threshold
            )));
        }
        if !(self.flag_threshold < self.medium_threshold
            && self.medium_threshold < self.high_threshold)
        {
            return Err(AnalysisError::config_error(format!(
                "severity thresholds must be strictly increasing: flag {} < medium {} < high {}",
                self.flag_threshold, self.medium_threshold, self.high_threshold
            )));
        }
        if !self.score_scale.is_finite() || self.score_scale <= 0.0 {
            return Err(AnalysisError::config_error(format!(
                "score scale must be positive, got {}",
                self.score_scale
            )));
        }
        if self.max_reasoning_parallel == 0 {
            return Err(AnalysisError::config_error(
                "max_reasoning_parallel must be at least 1",
            ));
        }
        if self.reasoning_timeout.is_zero() {
            return Err(AnalysisError::config_error(
                "reasoning timeout must be positive",
            ));
        }
        self.weights.validate()
    }
}

fn env_parse<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
