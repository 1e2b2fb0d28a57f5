//! Presentation context supplied by the caller.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Optional metadata about the presentation being analyzed. Threaded into
/// every generation prompt so feedback lands for the actual audience and
/// format instead of a generic one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PresentationContext {
    /// Who is watching ("hackathon judges", "seed investors")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,

    /// What the speaker wants ("win the demo prize", "raise a round")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,

    /// Time limit ("3 minutes")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<String>,

    /// Subject domain ("developer tooling", "healthcare")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Presentation mode ("live demo", "recorded pitch")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl PresentationContext {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.audience.is_none()
            && self.goal.is_none()
            && self.time_limit.is_none()
            && self.domain.is_none()
            && self.mode.is_none()
    }

    /// Render the context as prompt lines, or a neutral placeholder when
    /// nothing was provided.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "No specific context provided".to_string();
        }
        let mut lines = Vec::new();
        if let Some(audience) = &self.audience {
            lines.push(format!("Audience: {}", audience));
        }
        if let Some(goal) = &self.goal {
            lines.push(format!("Goal: {}", goal));
        }
        if let Some(time_limit) = &self.time_limit {
            lines.push(format!("Time limit: {}", time_limit));
        }
        if let Some(domain) = &self.domain {
            lines.push(format!("Domain: {}", domain));
        }
        if let Some(mode) = &self.mode {
            lines.push(format!("Mode: {}", mode));
        }
        lines.join("\n")
    }
}
