//! Signal result models.
//!
//! Each of the six clarity signals produces one `SignalResult` per window:
//! a bounded severity plus the structured evidence that triggered it. The
//! evidence is retained for the issue synthesizer, which references the
//! offending terms and claims in generated feedback.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum severity a single signal can report.
pub const MAX_SEVERITY: f64 = 5.0;

/// The six clarity signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Too many technical terms introduced at once
    ConceptSpike,
    /// Terms used before they are ever defined
    GroundingGap,
    /// Claims made without evidence
    TrustMeBro,
    /// Spoken content diverges from what is on screen
    VisualMismatch,
    /// Narrative told out of order
    StructureOrder,
    /// Filler-heavy, low-information speech
    RambleRatio,
}

impl SignalKind {
    /// All signals, in canonical order. Used for stable tie-breaking and
    /// for iterating the full signal set.
    pub const ALL: [SignalKind; 6] = [
        SignalKind::ConceptSpike,
        SignalKind::GroundingGap,
        SignalKind::TrustMeBro,
        SignalKind::VisualMismatch,
        SignalKind::StructureOrder,
        SignalKind::RambleRatio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConceptSpike => "concept_spike",
            Self::GroundingGap => "grounding_gap",
            Self::TrustMeBro => "trust_me_bro",
            Self::VisualMismatch => "visual_mismatch",
            Self::StructureOrder => "structure_order",
            Self::RambleRatio => "ramble_ratio",
        }
    }

    /// Short problem description used in generation prompts and fallback
    /// feedback text.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ConceptSpike => "too many new technical terms introduced at once",
            Self::GroundingGap => "terms used without ever being defined",
            Self::TrustMeBro => "claims made without evidence",
            Self::VisualMismatch => "what's said doesn't match what's shown",
            Self::StructureOrder => "the pitch structure is out of order",
            Self::RambleRatio => "too much filler and low information density",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discourse role of a transcript window within a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Problem,
    UserContext,
    Solution,
    Demo,
    Metrics,
    Architecture,
    Tradeoffs,
    Cta,
    /// Tagging failed or the segment fits no category
    #[default]
    #[serde(other)]
    Unknown,
}

impl RoleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::UserContext => "user_context",
            Self::Solution => "solution",
            Self::Demo => "demo",
            Self::Metrics => "metrics",
            Self::Architecture => "architecture",
            Self::Tradeoffs => "tradeoffs",
            Self::Cta => "cta",
            Self::Unknown => "unknown",
        }
    }

    /// Position in the expected narrative order, or `None` for `Unknown`.
    ///
    /// Expected order: problem, user_context, solution, demo, metrics,
    /// architecture, tradeoffs, cta.
    pub fn narrative_rank(&self) -> Option<u8> {
        match self {
            Self::Problem => Some(0),
            Self::UserContext => Some(1),
            Self::Solution => Some(2),
            Self::Demo => Some(3),
            Self::Metrics => Some(4),
            Self::Architecture => Some(5),
            Self::Tradeoffs => Some(6),
            Self::Cta => Some(7),
            Self::Unknown => None,
        }
    }

    /// Parse a role label as returned by the reasoning service.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "problem" => Self::Problem,
            "user_context" => Self::UserContext,
            "solution" => Self::Solution,
            "demo" => Self::Demo,
            "metrics" => Self::Metrics,
            "architecture" => Self::Architecture,
            "tradeoffs" => Self::Tradeoffs,
            "cta" => Self::Cta,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terms extracted from a window by the reasoning service (or the regex
/// fallback).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TermExtraction {
    /// Uppercase acronyms (API, RAG, FAISS, ...)
    pub acronyms: Vec<String>,

    /// Technical/domain terms (embeddings, latency, ...)
    pub technical_terms: Vec<String>,
}

impl TermExtraction {
    /// All distinct terms, acronyms first, original casing preserved.
    pub fn all_terms(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.acronyms
            .iter()
            .chain(self.technical_terms.iter())
            .filter(|t| !t.trim().is_empty())
            .filter(|t| seen.insert(t.trim().to_lowercase()))
            .map(|t| t.trim().to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.all_terms().is_empty()
    }
}

/// Claim/evidence classification of a window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClaimClassification {
    /// Benefit/superlative statements ("10x faster", "more scalable")
    pub claims: Vec<String>,

    /// Proof cues ("the graph shows", "benchmark results", "as you can see")
    pub evidence_cues: Vec<String>,
}

impl ClaimClassification {
    pub fn has_evidence(&self) -> bool {
        !self.evidence_cues.is_empty()
    }

    /// Claims not covered by an evidence cue (each cue supports one claim).
    pub fn unsupported_claims(&self) -> usize {
        self.claims.len().saturating_sub(self.evidence_cues.len())
    }
}

/// Structured evidence attached to a signal result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalEvidence {
    /// Terms surfaced by concept-spike extraction
    Terms(TermExtraction),

    /// Terms that were used without a definition, first seen in this window
    UngroundedTerms { undefined: Vec<String> },

    /// Claim/evidence classification
    Claims(ClaimClassification),

    /// Visual descriptions the window was compared against
    Visual { descriptions: Vec<String> },

    /// Discourse role of the window
    Role { role: RoleTag, confidence: f64 },

    /// No structured evidence (local numeric signals, degraded extractors)
    None,
}

impl SignalEvidence {
    /// Terms worth naming in feedback text, if any.
    pub fn notable_terms(&self) -> &[String] {
        match self {
            Self::UngroundedTerms { undefined } => undefined,
            _ => &[],
        }
    }
}

/// Output of one signal extractor for one window.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SignalResult {
    /// Which signal produced this result
    pub kind: SignalKind,

    /// Severity on the bounded 0–5 scale
    pub severity: f64,

    /// Structured evidence for the synthesizer
    pub evidence: SignalEvidence,
}

impl SignalResult {
    /// Create a result, clamping severity into `[0, MAX_SEVERITY]`.
    pub fn new(kind: SignalKind, severity: f64, evidence: SignalEvidence) -> Self {
        let severity = if severity.is_finite() {
            severity.clamp(0.0, MAX_SEVERITY)
        } else {
            0.0
        };
        Self {
            kind,
            severity,
            evidence,
        }
    }

    /// A zero-severity result with no evidence, used when a signal degrades
    /// (absent visual context, silent window, unavailable extractor).
    pub fn quiet(kind: SignalKind) -> Self {
        Self::new(kind, 0.0, SignalEvidence::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_clamped() {
        assert_eq!(
            SignalResult::new(SignalKind::RambleRatio, 9.0, SignalEvidence::None).severity,
            5.0
        );
        assert_eq!(
            SignalResult::new(SignalKind::RambleRatio, -1.0, SignalEvidence::None).severity,
            0.0
        );
        assert_eq!(
            SignalResult::new(SignalKind::RambleRatio, f64::NAN, SignalEvidence::None).severity,
            0.0
        );
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            RoleTag::Problem,
            RoleTag::UserContext,
            RoleTag::Solution,
            RoleTag::Demo,
            RoleTag::Metrics,
            RoleTag::Architecture,
            RoleTag::Tradeoffs,
            RoleTag::Cta,
        ] {
            assert_eq!(RoleTag::from_label(role.as_str()), role);
        }
        assert_eq!(RoleTag::from_label("interpretive dance"), RoleTag::Unknown);
    }

    #[test]
    fn test_narrative_rank_is_ordered() {
        assert!(RoleTag::Problem.narrative_rank() < RoleTag::Demo.narrative_rank());
        assert!(RoleTag::Demo.narrative_rank() < RoleTag::Cta.narrative_rank());
        assert_eq!(RoleTag::Unknown.narrative_rank(), None);
    }

    #[test]
    fn test_term_extraction_dedup() {
        let terms = TermExtraction {
            acronyms: vec!["RAG".into(), "rag".into(), "API".into()],
            technical_terms: vec!["embeddings".into(), "RAG".into(), " ".into()],
        };
        assert_eq!(terms.all_terms(), vec!["RAG", "API", "embeddings"]);
    }

    #[test]
    fn test_unsupported_claims() {
        let c = ClaimClassification {
            claims: vec!["faster".into(), "cheaper".into(), "scalable".into()],
            evidence_cues: vec!["benchmark".into()],
        };
        assert_eq!(c.unsupported_claims(), 2);
        assert!(c.has_evidence());

        let none = ClaimClassification::default();
        assert_eq!(none.unsupported_claims(), 0);
        assert!(!none.has_evidence());
    }

    #[test]
    fn test_signal_kind_serde_snake_case() {
        let json = serde_json::to_string(&SignalKind::TrustMeBro).unwrap();
        assert_eq!(json, r#""trust_me_bro""#);
    }
}
