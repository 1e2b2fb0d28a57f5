//! Clarity analysis pipeline.
//!
//! This crate provides:
//! - Windowing of a timestamped transcript into fixed-width slices
//! - Six per-window clarity signals with degraded-service fallbacks
//! - Weighted risk scoring with a flag threshold
//! - Issue synthesis (label, fix, three feedback tones) for flagged windows
//! - Whole-video clarity aggregation
//! - A batch pipeline orchestrator with bounded concurrency

pub mod aggregator;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod scorer;
pub mod signals;
pub mod synthesizer;
pub mod windower;

pub use aggregator::aggregate_clarity;
pub use config::{AnalysisConfig, SignalWeights};
pub use error::{AnalysisError, AnalysisResult};
pub use logging::RunLogger;
pub use pipeline::ClarityPipeline;
pub use scorer::{rank_windows, score_window};
pub use windower::build_windows;
