//! Shared data models for the PitchLens backend.
//!
//! This crate provides Serde-serializable types for:
//! - Transcripts and analysis windows
//! - Per-window signal results and evidence
//! - Window risk scores and user-facing issues
//! - The whole-video clarity report
//! - Presentation and visual context supplied by collaborators

pub mod context;
pub mod issue;
pub mod report;
pub mod risk;
pub mod signal;
pub mod timestamp;
pub mod transcript;
pub mod visual;
pub mod window;

// Re-export common types
pub use context::PresentationContext;
pub use issue::{Issue, Severity, ToneVariants};
pub use report::{ClarityReport, ClarityTier, RunId};
pub use risk::WindowRisk;
pub use signal::{
    ClaimClassification, RoleTag, SignalEvidence, SignalKind, SignalResult, TermExtraction,
    MAX_SEVERITY,
};
pub use timestamp::{format_timestamp, parse_timestamp, TimestampError};
pub use transcript::{Transcript, Utterance, VideoId};
pub use visual::{VisualContext, VisualMoment};
pub use window::Window;
