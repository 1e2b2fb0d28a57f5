//! Batch analysis worker.
//!
//! This crate provides:
//! - Loading of collaborator payloads (transcript, visual context,
//!   presentation context) from JSON files
//! - Reasoning strategy selection (Gemini when configured, degraded
//!   otherwise)
//! - The one-shot batch entry point that runs a single analysis to
//!   completion and writes the Clarity Report

pub mod error;
pub mod input;

pub use error::{WorkerError, WorkerResult};
pub use input::{load_presentation_context, load_transcript, load_visual_context};
