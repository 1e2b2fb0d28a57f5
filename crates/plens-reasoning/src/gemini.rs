//! Gemini-backed reasoning client.
//!
//! Implements the `Reasoning` trait against the Gemini generateContent API
//! with a model fallback chain, per-call retry, and JSON response hygiene
//! (the model likes to wrap JSON in markdown code fences).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use plens_models::{
    format_timestamp, ClaimClassification, RoleTag, TermExtraction, ToneVariants,
};

use crate::client::{FeedbackDraft, FeedbackRequest, Reasoning, ToneRequest};
use crate::error::{ReasoningError, ReasoningResult};
use crate::retry::{retry_async, RetryConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models tried in order until one answers.
const FALLBACK_MODELS: [&str; 3] = [
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.5-pro",
];

/// Gemini API client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    client: Client,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TermsPayload {
    #[serde(default)]
    acronyms: Vec<String>,
    #[serde(default)]
    technical_terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ClaimsPayload {
    #[serde(default)]
    claims: Vec<String>,
    #[serde(default)]
    evidence: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RolePayload {
    role: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

fn default_confidence() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
struct DraftPayload {
    label: String,
    #[serde(default)]
    explanation: String,
    fix: String,
}

#[derive(Debug, Deserialize)]
struct TonesPayload {
    kind: String,
    honest: String,
}

impl GeminiClient {
    /// Create a new Gemini client from the environment.
    pub fn new() -> ReasoningResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ReasoningError::config_error("GEMINI_API_KEY not set"))?;
        Ok(Self::with_api_key(api_key))
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the API base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Call the generateContent API for one model.
    async fn call_model(
        &self,
        model: &str,
        prompt: &str,
        json_response: bool,
        temperature: Option<f64>,
    ) -> ReasoningResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: json_response.then(|| "application/json".to_string()),
                temperature,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReasoningError::api_error(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ReasoningError::invalid_response(format!("bad response body: {}", e)))?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| ReasoningError::invalid_response("no content in response"))?;

        Ok(text)
    }

    /// Call the API, trying each fallback model with retry on transient
    /// failures.
    async fn generate(
        &self,
        operation: &str,
        prompt: &str,
        json_response: bool,
        temperature: Option<f64>,
    ) -> ReasoningResult<String> {
        let retry = RetryConfig::new(operation);
        let mut last_error = None;

        for model in FALLBACK_MODELS {
            let result = retry_async(&retry, ReasoningError::is_retryable, || {
                self.call_model(model, prompt, json_response, temperature)
            })
            .await
            .into_result();

            match result {
                Ok(text) => {
                    info!(model = model, operation = operation, "Gemini call succeeded");
                    return Ok(text);
                }
                Err(e) => {
                    warn!(model = model, operation = operation, error = %e, "Gemini model failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ReasoningError::api_error("all Gemini models failed")))
    }

    /// Call the API expecting a JSON payload and deserialize it.
    async fn generate_json<T: for<'de> Deserialize<'de>>(
        &self,
        operation: &str,
        prompt: &str,
    ) -> ReasoningResult<T> {
        let text = self.generate(operation, prompt, true, None).await?;
        let cleaned = strip_code_fences(&text);
        serde_json::from_str(cleaned).map_err(|e| {
            ReasoningError::invalid_response(format!("{}: failed to parse JSON: {}", operation, e))
        })
    }
}

/// Strip a surrounding markdown code fence from a model response.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[async_trait]
impl Reasoning for GeminiClient {
    async fn extract_terms(&self, window_text: &str) -> ReasoningResult<TermExtraction> {
        let prompt = format!(
            r#"Extract all technical terms, buzzwords, and acronyms from this transcript excerpt.
Return ONLY a JSON object with these fields:
- acronyms: list of acronyms (API, ML, RAG, etc.)
- technical_terms: list of technical/domain-specific terms (authentication, embeddings, latency, etc.)

Transcript: "{window_text}"
"#
        );

        let payload: TermsPayload = self.generate_json("extract_terms", &prompt).await?;
        Ok(TermExtraction {
            acronyms: payload.acronyms,
            technical_terms: payload.technical_terms,
        })
    }

    async fn check_definition(&self, term: &str, text: &str) -> ReasoningResult<bool> {
        let prompt = format!(
            r#"Does this transcript excerpt DEFINE or EXPLAIN the term "{term}"?

A definition means explaining what {term} is, what it means, or introducing it with context.
Just mentioning {term} without explanation does NOT count as a definition.

Return ONLY: yes or no

Transcript: "{text}"
"#
        );

        let answer = self
            .generate("check_definition", &prompt, false, None)
            .await?;
        Ok(answer.to_lowercase().contains("yes"))
    }

    async fn classify_claims(&self, window_text: &str) -> ReasoningResult<ClaimClassification> {
        let prompt = format!(
            r#"Analyze this transcript excerpt for CLAIMS and EVIDENCE.

CLAIMS: statements about benefits, improvements, or superlatives
("faster", "more scalable", "reduced latency", "secure", "efficient")

EVIDENCE: references to proof, data, or demonstration
("as you can see", "the graph shows", "benchmark results", "measured", "before/after")

Return ONLY a JSON object:
{{
    "claims": [list of claim statements found],
    "evidence": [list of evidence cues found]
}}

Transcript: "{window_text}"
"#
        );

        let payload: ClaimsPayload = self.generate_json("classify_claims", &prompt).await?;
        Ok(ClaimClassification {
            claims: payload.claims,
            evidence_cues: payload.evidence,
        })
    }

    async fn tag_role(&self, window_text: &str) -> ReasoningResult<(RoleTag, f64)> {
        let prompt = format!(
            r#"Classify this demo/pitch transcript segment into ONE category:

- problem: describing the problem/pain point
- user_context: explaining who the user is or context
- solution: presenting the solution/product
- demo: demonstrating the product (showing features)
- metrics: showing results, metrics, benchmarks
- architecture: explaining technical architecture
- tradeoffs: discussing tradeoffs or alternatives
- cta: call to action, next steps, ask

Return ONLY a JSON object:
{{
    "role": "one of the above categories",
    "confidence": 0.0-1.0
}}

Transcript: "{window_text}"
"#
        );

        let payload: RolePayload = self.generate_json("tag_role", &prompt).await?;
        Ok((
            RoleTag::from_label(&payload.role),
            payload.confidence.clamp(0.0, 1.0),
        ))
    }

    async fn draft_feedback(&self, request: &FeedbackRequest) -> ReasoningResult<FeedbackDraft> {
        let signals_text = request
            .signals
            .iter()
            .map(|s| s.description())
            .collect::<Vec<_>>()
            .join(", ");

        let prompt = format!(
            r#"You are analyzing a presentation segment (starting at {at}) with these clarity issues: {signals_text}

Presentation context:
{context}

Transcript: "{window_text}"
Surrounding transcript: "{surrounding}"
Problematic terms: {terms:?}
Unsupported claims: {claims:?}

Generate:
1. A catchy 2-4 word label that resonates with this audience
2. A brief explanation of why this is an issue for this specific audience and goal
3. A specific fix that considers the time limit and target user

Return ONLY a JSON object:
{{
    "label": "catchy label",
    "explanation": "what's wrong",
    "fix": "how to fix it"
}}
"#,
            at = format_timestamp(request.start_sec),
            context = request.context.describe(),
            window_text = request.window_text,
            surrounding = request.surrounding_text,
            terms = request.terms,
            claims = request.claims,
        );

        let payload: DraftPayload = self.generate_json("draft_feedback", &prompt).await?;
        Ok(FeedbackDraft {
            label: payload.label,
            explanation: payload.explanation,
            fix: payload.fix,
        })
    }

    async fn tone_variants(&self, request: &ToneRequest) -> ReasoningResult<ToneVariants> {
        let signals_text = request
            .signals
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let standard_prompt = format!(
            r#"You are a pitch coach giving feedback on a presentation.

Presentation context:
{context}

Issue label: {label}
Problem: {explanation}
Suggested fix: {fix}
Triggered signals: {signals_text}
Transcript excerpt: "{excerpt}"

Generate KIND and HONEST feedback versions with CONCRETE, SPECIFIC suggestions based on the actual transcript.

KIND (sugar-coated, encouraging, mentor-like): start with something positive,
frame the issue gently ("I noticed...", "Consider..."), end with encouragement.

HONEST (straightforward, professional, direct): state the issue clearly,
explain the impact on the audience, give a specific actionable fix.

Return ONLY a JSON object:
{{
    "kind": "encouraging sugar-coated version with specific fix",
    "honest": "direct professional version with clear action"
}}
"#,
            context = request.context.describe(),
            label = request.draft.label,
            explanation = request.draft.explanation,
            fix = request.draft.fix,
            excerpt = request.excerpt,
        );

        let brutal_prompt = format!(
            r#"You are a savage but constructive pitch roaster.

Presentation context:
{context}

Issue: {label}
Problem: {explanation}
Suggested fix: {fix}
Transcript excerpt: "{excerpt}"

Write a BRUTAL 3-line roast in this EXACT format:

Line 1 (Punchline): one witty metaphor or comparison. Creative, sarcastic, memorable. NO profanity.
Line 2 (Callout): name the exact clarity flaw in 8-14 words.
Line 3 (Fix): ONE rewrite sentence the speaker can say verbatim, starting with "Say:" or "Try:"

Now write YOUR 3-line brutal roast for this issue:"#,
            context = request.context.describe(),
            label = request.draft.label,
            explanation = request.draft.explanation,
            fix = request.draft.fix,
            excerpt = request.excerpt,
        );

        let standard: TonesPayload = self.generate_json("tone_variants", &standard_prompt).await?;

        // Brutal tone goes out at high temperature and comes back as plain
        // text, not JSON.
        let brutal_text = self
            .generate("tone_variants_brutal", &brutal_prompt, false, Some(0.9))
            .await?;
        let brutal = strip_code_fences(&brutal_text).to_string();

        Ok(ToneVariants {
            kind: standard.kind,
            honest: standard.honest,
            brutal,
        })
    }
}
