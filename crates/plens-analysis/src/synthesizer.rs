//! Issue synthesis for flagged windows.
//!
//! Turns a flagged window and its signal evidence into a user-facing
//! Issue: catchy label, concrete fix, and the three feedback tones. Text
//! generation is delegated; a full fallback ladder guarantees the output
//! contract even when generation fails: label, fix, and all three tones
//! are never empty, and the fix names a specific term or claim whenever
//! the evidence offers one.

use std::cmp::Ordering;

use plens_models::{
    Issue, PresentationContext, SignalEvidence, SignalKind, SignalResult, ToneVariants, Window,
    WindowRisk,
};
use plens_reasoning::{FeedbackDraft, FeedbackRequest, Reasoning, ToneRequest};

use crate::config::AnalysisConfig;
use crate::scorer::severity_for_risk;
use crate::signals::delegate;

/// Signals that contributed to the flag, dominant first.
///
/// Ordered by severity descending; ties break on the canonical signal
/// order so the result is deterministic.
fn triggered_signals(signals: &[SignalResult]) -> Vec<&SignalResult> {
    let canonical = |kind: SignalKind| {
        SignalKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(SignalKind::ALL.len())
    };

    let mut triggered: Vec<&SignalResult> = signals.iter().filter(|s| s.severity > 0.0).collect();
    if triggered.is_empty() {
        triggered = signals.iter().collect();
    }
    triggered.sort_by(|a, b| {
        b.severity
            .partial_cmp(&a.severity)
            .unwrap_or(Ordering::Equal)
            .then(canonical(a.kind).cmp(&canonical(b.kind)))
    });
    triggered
}

/// Terms worth naming in the fix: ungrounded terms first, then anything
/// concept-spike surfaced.
fn notable_terms(signals: &[SignalResult]) -> Vec<String> {
    for s in signals {
        if let SignalEvidence::UngroundedTerms { undefined } = &s.evidence {
            if !undefined.is_empty() {
                return undefined.clone();
            }
        }
    }
    for s in signals {
        if let SignalEvidence::Terms(terms) = &s.evidence {
            let all = terms.all_terms();
            if !all.is_empty() {
                return all;
            }
        }
    }
    Vec::new()
}

/// Claims left unsupported in this window, if the classifier found any.
fn unsupported_claims(signals: &[SignalResult]) -> Vec<String> {
    for s in signals {
        if let SignalEvidence::Claims(classification) = &s.evidence {
            if classification.unsupported_claims() > 0 {
                return classification.claims.clone();
            }
        }
    }
    Vec::new()
}

fn fallback_label(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::ConceptSpike => "Buzzword Overdose",
        SignalKind::GroundingGap => "Ghost Terms",
        SignalKind::TrustMeBro => "Trust Me Bro",
        SignalKind::VisualMismatch => "Slide Mismatch",
        SignalKind::StructureOrder => "Plot Twist Structure",
        SignalKind::RambleRatio => "Filler Fog",
    }
}

fn fallback_fix(kind: SignalKind, terms: &[String], claims: &[String]) -> String {
    if let Some(term) = terms.first() {
        return format!(
            "Define {} in one sentence the first time you say it.",
            term
        );
    }
    if let Some(claim) = claims.first() {
        return format!("Back the \"{}\" claim with one number or a quick demo.", claim);
    }
    match kind {
        SignalKind::ConceptSpike => {
            "Introduce at most one new term at a time and define it as you go.".to_string()
        }
        SignalKind::GroundingGap => "Define each term before you lean on it.".to_string(),
        SignalKind::TrustMeBro => {
            "Attach one number or demo moment to your biggest claim.".to_string()
        }
        SignalKind::VisualMismatch => {
            "Narrate what is actually on screen before moving on.".to_string()
        }
        SignalKind::StructureOrder => {
            "State the problem before the solution, and the solution before the demo.".to_string()
        }
        SignalKind::RambleRatio => {
            "Cut the filler and lead with the point of this segment.".to_string()
        }
    }
}

fn fallback_explanation(triggered: &[&SignalResult]) -> String {
    let described: Vec<&str> = triggered.iter().map(|s| s.kind.description()).collect();
    format!("Issues detected: {}.", described.join(", "))
}

fn brutal_punchline(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::ConceptSpike => {
            "Acronym speedrun detected: you're speaking fluent jargon to a room that speaks English."
        }
        SignalKind::GroundingGap => {
            "You're name-dropping terms like they're your college roommates. Spoiler: the audience just met them."
        }
        SignalKind::TrustMeBro => {
            "Bold claims with the confidence of someone who forgot to pack the evidence."
        }
        SignalKind::VisualMismatch => "Your slides and your mouth are giving two different talks.",
        SignalKind::StructureOrder => {
            "You're showing the punchline before the setup. That's comedy school, day negative one."
        }
        SignalKind::RambleRatio => "That was forty words in search of a sentence.",
    }
}

/// Templated tones used when generation fails (or returns blanks).
fn fallback_tones(draft: &FeedbackDraft, dominant: SignalKind) -> ToneVariants {
    let callout = if draft.explanation.chars().count() > 80 {
        let truncated: String = draft.explanation.chars().take(80).collect();
        format!("{}...", truncated)
    } else {
        draft.explanation.clone()
    };

    ToneVariants {
        kind: format!(
            "I can see the potential here! {} A small adjustment would really help: {} This will make the pitch even stronger.",
            draft.explanation, draft.fix
        ),
        honest: format!("{}: {} Here's what to do: {}", draft.label, draft.explanation, draft.fix),
        brutal: format!("{}\n{}\nTry: {}", brutal_punchline(dominant), callout, draft.fix),
    }
}

/// Replace any blank field in a generated draft with its fallback.
fn sanitize_draft(
    mut draft: FeedbackDraft,
    dominant: SignalKind,
    triggered: &[&SignalResult],
    terms: &[String],
    claims: &[String],
) -> FeedbackDraft {
    if draft.label.trim().is_empty() {
        draft.label = fallback_label(dominant).to_string();
    }
    if draft.explanation.trim().is_empty() {
        draft.explanation = fallback_explanation(triggered);
    }
    if draft.fix.trim().is_empty() {
        draft.fix = fallback_fix(dominant, terms, claims);
    }
    draft
}

/// Synthesize the Issue for one flagged window.
///
/// Timestamps are copied from the window risk verbatim, never re-derived.
pub async fn synthesize_issue(
    reasoner: &dyn Reasoning,
    config: &AnalysisConfig,
    window: &Window,
    risk: &WindowRisk,
    signals: &[SignalResult],
    surrounding_text: &str,
    context: &PresentationContext,
) -> Issue {
    let triggered = triggered_signals(signals);
    let dominant = triggered.first().map(|s| s.kind).unwrap_or(SignalKind::RambleRatio);
    let kinds: Vec<SignalKind> = triggered.iter().map(|s| s.kind).collect();
    let terms = notable_terms(signals);
    let claims = unsupported_claims(signals);

    let request = FeedbackRequest {
        window_text: window.text.clone(),
        surrounding_text: surrounding_text.to_string(),
        signals: kinds.clone(),
        terms: terms.clone(),
        claims: claims.clone(),
        context: context.clone(),
        start_sec: window.start_sec,
    };

    let draft = delegate(
        config.reasoning_timeout,
        "draft_feedback",
        reasoner.draft_feedback(&request),
    )
    .await
    .unwrap_or_else(|| FeedbackDraft {
        label: fallback_label(dominant).to_string(),
        explanation: fallback_explanation(&triggered),
        fix: fallback_fix(dominant, &terms, &claims),
    });
    let draft = sanitize_draft(draft, dominant, &triggered, &terms, &claims);

    let tone_request = ToneRequest {
        draft: draft.clone(),
        excerpt: window.text.clone(),
        signals: kinds.clone(),
        context: context.clone(),
    };

    let defaults = fallback_tones(&draft, dominant);
    let tone = match delegate(
        config.reasoning_timeout,
        "tone_variants",
        reasoner.tone_variants(&tone_request),
    )
    .await
    {
        Some(mut generated) => {
            // never ship a blank tone
            if generated.kind.trim().is_empty() {
                generated.kind = defaults.kind.clone();
            }
            if generated.honest.trim().is_empty() {
                generated.honest = defaults.honest.clone();
            }
            if generated.brutal.trim().is_empty() {
                generated.brutal = defaults.brutal.clone();
            }
            generated
        }
        None => defaults,
    };

    Issue {
        segment_id: Issue::segment_id_for(risk.ordinal),
        start_sec: risk.start_sec,
        end_sec: risk.end_sec,
        risk: risk.risk,
        severity: severity_for_risk(risk.risk, config),
        label: draft.label,
        explanation: Some(draft.explanation),
        fix: draft.fix,
        tone,
        signals: kinds,
    }
}
