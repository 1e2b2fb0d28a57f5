//! The delegated-reasoning capability boundary.
//!
//! Each signal extractor and the issue synthesizer depend on exactly one
//! trait method, so the pipeline is testable with a scripted implementation
//! and keeps working (degraded) when the real service is down.

use async_trait::async_trait;

use plens_models::{
    ClaimClassification, PresentationContext, RoleTag, SignalKind, TermExtraction, ToneVariants,
};

use crate::error::{ReasoningError, ReasoningResult};

/// Request for label/explanation/fix generation for one flagged window.
#[derive(Debug, Clone)]
pub struct FeedbackRequest {
    /// Transcript text of the flagged window
    pub window_text: String,

    /// Transcript text around the window, for grounding
    pub surrounding_text: String,

    /// Signals that triggered the flag, dominant first
    pub signals: Vec<SignalKind>,

    /// Problematic terms to reference, if any
    pub terms: Vec<String>,

    /// Unsupported claims to reference, if any
    pub claims: Vec<String>,

    /// Caller-supplied presentation context
    pub context: PresentationContext,

    /// Window start, for "at 00:10" phrasing
    pub start_sec: f64,
}

/// Generated label/explanation/fix for a flagged window.
#[derive(Debug, Clone)]
pub struct FeedbackDraft {
    /// Catchy 2-4 word label
    pub label: String,

    /// 1-2 sentence explanation of the problem
    pub explanation: String,

    /// Actionable one-line fix
    pub fix: String,
}

/// Request for the three tone renderings of a drafted issue.
#[derive(Debug, Clone)]
pub struct ToneRequest {
    /// The drafted label/explanation/fix being rendered
    pub draft: FeedbackDraft,

    /// Transcript excerpt for personalized feedback
    pub excerpt: String,

    /// Triggering signals, dominant first
    pub signals: Vec<SignalKind>,

    /// Caller-supplied presentation context
    pub context: PresentationContext,
}

/// Capability interface to the external reasoning service.
///
/// Every method is an independent, idempotent request/response call with no
/// side effects on pipeline state. Implementations must not block forever:
/// callers add their own timeout, but a well-behaved implementation returns
/// an error when the underlying service does.
#[async_trait]
pub trait Reasoning: Send + Sync {
    /// Extract technical terms, buzzwords, and acronyms from window text.
    async fn extract_terms(&self, window_text: &str) -> ReasoningResult<TermExtraction>;

    /// Does `text` define or explain `term` (not just mention it)?
    async fn check_definition(&self, term: &str, text: &str) -> ReasoningResult<bool>;

    /// Classify claim statements and evidence cues in window text.
    async fn classify_claims(&self, window_text: &str) -> ReasoningResult<ClaimClassification>;

    /// Tag the discourse role of a window; returns the role and a 0-1
    /// confidence.
    async fn tag_role(&self, window_text: &str) -> ReasoningResult<(RoleTag, f64)>;

    /// Generate a label, explanation, and fix for a flagged window.
    async fn draft_feedback(&self, request: &FeedbackRequest) -> ReasoningResult<FeedbackDraft>;

    /// Render the drafted feedback in kind/honest/brutal tones.
    async fn tone_variants(&self, request: &ToneRequest) -> ReasoningResult<ToneVariants>;
}

/// A reasoning strategy that is permanently degraded.
///
/// Used when no API key is configured and in tests that exercise the
/// extractors' fallback paths: every call fails fast, so each signal uses
/// its deterministic local approximation.
#[derive(Debug, Clone, Default)]
pub struct UnavailableReasoning;

impl UnavailableReasoning {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reasoning for UnavailableReasoning {
    async fn extract_terms(&self, _window_text: &str) -> ReasoningResult<TermExtraction> {
        Err(ReasoningError::Unavailable)
    }

    async fn check_definition(&self, _term: &str, _text: &str) -> ReasoningResult<bool> {
        Err(ReasoningError::Unavailable)
    }

    async fn classify_claims(&self, _window_text: &str) -> ReasoningResult<ClaimClassification> {
        Err(ReasoningError::Unavailable)
    }

    async fn tag_role(&self, _window_text: &str) -> ReasoningResult<(RoleTag, f64)> {
        Err(ReasoningError::Unavailable)
    }

    async fn draft_feedback(&self, _request: &FeedbackRequest) -> ReasoningResult<FeedbackDraft> {
        Err(ReasoningError::Unavailable)
    }

    async fn tone_variants(&self, _request: &ToneRequest) -> ReasoningResult<ToneVariants> {
        Err(ReasoningError::Unavailable)
    }
}
