//! Trust-Me-Bro signal.
//!
//! Classifies the window's sentences into claims and evidence cues and
//! penalizes claims left without support. Classification is delegated;
//! the fallback scans for the claim/evidence keyword lexicons.

use std::time::Duration;

use plens_models::{
    ClaimClassification, SignalEvidence, SignalKind, SignalResult, Window, MAX_SEVERITY,
};
use plens_reasoning::Reasoning;

use super::delegate;

/// Benefit/superlative keywords that read as claims.
const CLAIM_KEYWORDS: [&str; 11] = [
    "faster",
    "better",
    "improved",
    "reduced",
    "increased",
    "scalable",
    "secure",
    "efficient",
    "optimized",
    "enhanced",
    "superior",
];

/// Proof cues that read as evidence.
const EVIDENCE_KEYWORDS: [&str; 11] = [
    "graph",
    "chart",
    "demo",
    "show",
    "see",
    "benchmark",
    "result",
    "data",
    "measured",
    "tested",
    "proof",
];

/// Keyword approximation of claim/evidence classification.
pub fn fallback_classification(text: &str) -> ClaimClassification {
    let text = text.to_lowercase();
    ClaimClassification {
        claims: CLAIM_KEYWORDS
            .iter()
            .filter(|k| text.contains(**k))
            .map(|k| k.to_string())
            .collect(),
        evidence_cues: EVIDENCE_KEYWORDS
            .iter()
            .filter(|k| text.contains(**k))
            .map(|k| k.to_string())
            .collect(),
    }
}

/// Analyze one window.
pub async fn analyze(reasoner: &dyn Reasoning, timeout: Duration, window: &Window) -> SignalResult {
    if window.is_silent() {
        return SignalResult::quiet(SignalKind::TrustMeBro);
    }

    let classification = delegate(
        timeout,
        "classify_claims",
        reasoner.classify_claims(&window.text),
    )
    .await
    .unwrap_or_else(|| fallback_classification(&window.text));

    let total = classification.claims.len();
    let severity = if total == 0 {
        0.0
    } else {
        MAX_SEVERITY * classification.unsupported_claims() as f64 / total as f64
    };

    SignalResult::new(
        SignalKind::TrustMeBro,
        severity,
        SignalEvidence::Claims(classification),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use plens_reasoning::UnavailableReasoning;

    fn window(text: &str) -> Window {
        Window::new(0, 0.0, 10.0, text)
    }

    #[test]
    fn test_fallback_finds_claims_and_evidence() {
        let c = fallback_classification("it is faster and more scalable, as the benchmark shows");
        assert!(c.claims.contains(&"faster".to_string()));
        assert!(c.claims.contains(&"scalable".to_string()));
        assert!(c.evidence_cues.contains(&"benchmark".to_string()));
    }

    #[tokio::test]
    async fn test_unsupported_claims_raise_severity() {
        let result = analyze(
            &UnavailableReasoning::new(),
            Duration::from_millis(50),
            &window("our system is faster, more secure, and infinitely scalable"),
        )
        .await;

        // three claims, zero evidence cues
        assert_eq!(result.severity, MAX_SEVERITY);
    }

    #[tokio::test]
    async fn test_evidenced_claims_lower_severity() {
        let result = analyze(
            &UnavailableReasoning::new(),
            Duration::from_millis(50),
            &window("it is faster, and this benchmark graph shows the measured result"),
        )
        .await;

        // one claim, plenty of cues
        assert_eq!(result.severity, 0.0);
    }

    #[tokio::test]
    async fn test_no_claims_is_quiet() {
        let result = analyze(
            &UnavailableReasoning::new(),
            Duration::from_millis(50),
            &window("here is how the scheduling screen works"),
        )
        .await;
        assert_eq!(result.severity, 0.0);
    }
}
