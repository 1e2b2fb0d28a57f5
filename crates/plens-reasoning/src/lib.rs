//! Delegated-reasoning client for PitchLens.
//!
//! This crate provides:
//! - The `Reasoning` capability trait, one method per signal need
//! - A Gemini-backed implementation with model fallback and retry
//! - An always-degraded implementation for offline runs and tests
//!
//! Every call is a side-effect-free request/response exchange. Callers are
//! expected to wrap calls in their own timeout and fall back locally on
//! error; nothing in this crate aborts an analysis run.

pub mod client;
pub mod error;
pub mod gemini;
pub mod retry;

pub use client::{FeedbackDraft, FeedbackRequest, Reasoning, ToneRequest, UnavailableReasoning};
pub use error::{ReasoningError, ReasoningResult};
pub use gemini::GeminiClient;
pub use retry::{retry_async, RetryConfig, RetryResult};
