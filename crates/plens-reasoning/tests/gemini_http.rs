//! HTTP-level tests for the Gemini client against a mock server.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plens_reasoning::{GeminiClient, Reasoning};

fn gemini_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn extract_terms_parses_fenced_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
            "```json\n{\"acronyms\": [\"RAG\", \"API\"], \"technical_terms\": [\"embeddings\"]}\n```",
        )))
        .mount(&server)
        .await;

    let client = GeminiClient::with_api_key("test-key").with_base_url(server.uri());
    let terms = client
        .extract_terms("we use RAG over the API with embeddings")
        .await
        .unwrap();

    assert_eq!(terms.acronyms, vec!["RAG", "API"]);
    assert_eq!(terms.technical_terms, vec!["embeddings"]);
}

#[tokio::test]
async fn falls_back_to_next_model_when_first_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
            "{\"claims\": [\"10x faster\"], \"evidence\": []}",
        )))
        .mount(&server)
        .await;

    let client = GeminiClient::with_api_key("test-key").with_base_url(server.uri());
    let claims = client.classify_claims("it is 10x faster").await.unwrap();

    assert_eq!(claims.claims, vec!["10x faster"]);
    assert!(!claims.has_evidence());
}

#[tokio::test]
async fn check_definition_reads_plain_text_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("Yes")))
        .mount(&server)
        .await;

    let client = GeminiClient::with_api_key("test-key").with_base_url(server.uri());
    assert!(client
        .check_definition("RAG", "RAG is retrieval augmented generation")
        .await
        .unwrap());
}

#[tokio::test]
async fn malformed_payload_is_an_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("not json at all")))
        .mount(&server)
        .await;

    let client = GeminiClient::with_api_key("test-key").with_base_url(server.uri());
    let result = client.extract_terms("anything").await;

    assert!(result.is_err());
    assert!(!result.unwrap_err().is_retryable());
}
