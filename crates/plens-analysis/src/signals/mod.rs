//! The six per-window clarity signals.
//!
//! Four signals (concept spike, trust-me-bro, visual mismatch, ramble
//! ratio) are independent per window and run concurrently across windows.
//! Two (grounding gap, structure order) carry forward state and run in a
//! single sequential pass in timestamp order.
//!
//! Every delegated call goes through [`delegate`], which enforces the
//! per-call timeout and converts any failure into a fallback decision for
//! the calling extractor. A degraded reasoning service never fails a
//! window, let alone a run.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use plens_reasoning::ReasoningResult;

pub mod claims;
pub mod concept_spike;
pub mod grounding;
pub mod ramble;
pub mod structure;
pub mod visual;

/// Run a delegated reasoning call under a timeout.
///
/// Returns `None` on error or timeout; the caller applies its deterministic
/// fallback (or degrades the signal to zero contribution).
pub(crate) async fn delegate<T, Fut>(timeout: Duration, operation: &str, fut: Fut) -> Option<T>
where
    Fut: Future<Output = ReasoningResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!(operation = operation, error = %e, "Delegated reasoning failed, using fallback");
            None
        }
        Err(_) => {
            warn!(operation = operation, "Delegated reasoning timed out, using fallback");
            None
        }
    }
}

/// Lowercased alphanumeric word tokens of a text.
pub(crate) fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plens_reasoning::ReasoningError;

    #[test]
    fn test_words_tokenization() {
        assert_eq!(
            words("We use RAG, don't we?"),
            vec!["we", "use", "rag", "don't", "we"]
        );
        assert!(words("  ...  ").is_empty());
    }

    #[tokio::test]
    async fn test_delegate_passes_through_success() {
        let result = delegate(Duration::from_secs(1), "test", async { Ok(42) }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_delegate_converts_error_to_none() {
        let result: Option<u32> = delegate(Duration::from_secs(1), "test", async {
            Err(ReasoningError::Unavailable)
        })
        .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delegate_enforces_timeout() {
        let result: Option<u32> = delegate(Duration::from_millis(10), "test", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        })
        .await;
        assert_eq!(result, None);
    }
}
