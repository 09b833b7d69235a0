//! Google Gemini native completion provider.
//!
//! Talks to the Gemini `generateContent` REST endpoint directly with
//! reqwest. One prompt in, concatenated text of the first candidate out.
//!
//! # Authentication
//!
//! The API key is sent in the `x-goog-api-key` header rather than the query
//! string, so transport errors (which echo the URL) never contain it.
//!
//! # Behaviour
//!
//! Exactly one HTTP request per [`BaseLLM::generate`] call. There is no
//! retry loop and no timeout unless one is configured.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::{BaseLLM, GenerationError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Public Gemini API base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Longest slice of an unparseable body kept in error messages.
const MAX_BODY_SNIPPET: usize = 500;

// ---------------------------------------------------------------------------
// GeminiCompletion provider
// ---------------------------------------------------------------------------

/// Google Gemini native completion implementation.
///
/// # Example
///
/// ```ignore
/// let gemini = GeminiCompletion::new("gemini-2.0-flash", api_key)
///     .with_temperature(0.4);
/// let text = gemini.generate("Summarise this portfolio.").await?;
/// ```
#[derive(Clone)]
pub struct GeminiCompletion {
    model: String,
    api_key: String,
    base_url: String,
    /// Sampling temperature; omitted from the request when `None`.
    pub temperature: Option<f64>,
    /// Maximum output tokens; omitted from the request when `None`.
    pub max_output_tokens: Option<u32>,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCompletion")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish_non_exhaustive()
    }
}

impl GeminiCompletion {
    /// Create a new Gemini completion provider against the public endpoint.
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: None,
            max_output_tokens: None,
            client: reqwest::Client::new(),
        }
    }

    /// Point the provider at a different base URL (proxy, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Apply a per-request timeout. Without one the call waits indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, GenerationError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Get the API endpoint URL.
    fn api_endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build generation config for the Gemini API.
    ///
    /// Returns `None` when nothing is configured so the field is left out.
    pub fn generation_config(&self) -> Option<Value> {
        let mut config = serde_json::Map::new();
        if let Some(temp) = self.temperature {
            config.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = self.max_output_tokens {
            config.insert("maxOutputTokens".to_string(), serde_json::json!(max_tokens));
        }
        if config.is_empty() {
            None
        } else {
            Some(Value::Object(config))
        }
    }

    /// Build the complete request body.
    pub fn build_request_body(&self, prompt: &str) -> Value {
        let mut body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });
        if let Some(config) = self.generation_config() {
            body["generationConfig"] = config;
        }
        body
    }

    /// Parse a Gemini API response into the generated text.
    pub fn parse_response(response: &Value) -> Result<String, GenerationError> {
        if let Some(error) = response.get("error") {
            let status = error
                .get("code")
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(500);
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown Gemini API error");
            return Err(GenerationError::Api {
                status,
                message: message.to_string(),
            });
        }

        let candidates = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .filter(|c| !c.is_empty());

        let candidate = match candidates {
            Some(candidates) => &candidates[0],
            None => {
                if let Some(reason) = response
                    .get("promptFeedback")
                    .and_then(|f| f.get("blockReason"))
                    .and_then(|r| r.as_str())
                {
                    return Err(GenerationError::Blocked {
                        reason: reason.to_string(),
                    });
                }
                return Err(GenerationError::MalformedResponse(
                    "No candidates in Gemini response".to_string(),
                ));
            }
        };

        let parts = match candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
        {
            Some(parts) => parts,
            None => {
                return match candidate.get("finishReason").and_then(|r| r.as_str()) {
                    Some(reason @ ("SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                        Err(GenerationError::Blocked {
                            reason: reason.to_string(),
                        })
                    }
                    _ => Err(GenerationError::MalformedResponse(
                        "No content.parts in Gemini response".to_string(),
                    )),
                };
            }
        };

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        Ok(text)
    }
}

fn snippet(body: &str) -> &str {
    let mut end = body.len().min(MAX_BODY_SNIPPET);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[async_trait]
impl BaseLLM for GeminiCompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        log::debug!(
            "GeminiCompletion.generate: model={}, prompt_chars={}",
            self.model,
            prompt.len(),
        );

        let response = self
            .client
            .post(self.api_endpoint())
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            // Gemini wraps most failures in {"error": {...}}; prefer its message.
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| snippet(&response_text).to_string());
            log::warn!("Gemini API returned {}: {}", status, message);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            GenerationError::MalformedResponse(format!(
                "Failed to parse Gemini response: {} - Body: {}",
                e,
                snippet(&response_text)
            ))
        })?;

        if let Some(usage) = response_json.get("usageMetadata") {
            log::debug!("Gemini usage: {}", usage);
        }

        Self::parse_response(&response_json)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::HeaderMap, http::StatusCode, routing::post, Json, Router};

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_request_body_without_config() {
        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "k");
        let body = gemini.build_request_body("hello");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_request_body_with_config() {
        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "k")
            .with_temperature(0.2)
            .with_max_output_tokens(256);
        let body = gemini.build_request_body("hello");
        assert_eq!(body["generationConfig"]["temperature"], 0.2);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "super-secret");
        let debug = format!("{:?}", gemini);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("gemini-2.0-flash"));
    }

    #[test]
    fn test_parse_response_joins_text_parts() {
        let response = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
            }]
        });
        assert_eq!(
            GeminiCompletion::parse_response(&response).unwrap(),
            "Hello, world"
        );
    }

    #[test]
    fn test_parse_response_blocked_prompt() {
        let response = serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        });
        let err = GeminiCompletion::parse_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked { ref reason } if reason == "SAFETY"));
    }

    #[test]
    fn test_parse_response_missing_parts() {
        let response = serde_json::json!({ "candidates": [{ "finishReason": "STOP" }] });
        let err = GeminiCompletion::parse_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));

        let response = serde_json::json!({ "candidates": [] });
        let err = GeminiCompletion::parse_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_response_error_object() {
        let response = serde_json::json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        });
        let err = GeminiCompletion::parse_response(&response).unwrap_err();
        assert!(matches!(err, GenerationError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let router = Router::new().route(
            "/models/:action",
            post(
                |Path(action): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(action, "gemini-2.0-flash:generateContent");
                    assert_eq!(headers["x-goog-api-key"], "test-key");
                    let prompt = body["contents"][0]["parts"][0]["text"]
                        .as_str()
                        .unwrap_or_default()
                        .to_string();
                    Json(serde_json::json!({
                        "candidates": [{
                            "content": { "role": "model", "parts": [{ "text": format!("echo: {}", prompt) }] }
                        }],
                        "usageMetadata": { "promptTokenCount": 3, "candidatesTokenCount": 2 }
                    }))
                },
            ),
        );
        let base = spawn_mock(router).await;

        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "test-key").with_base_url(base);
        let text = gemini.generate("ping").await.unwrap();
        assert_eq!(text, "echo: ping");
    }

    #[tokio::test]
    async fn test_generate_maps_quota_error() {
        let router = Router::new().route(
            "/models/:action",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(serde_json::json!({
                        "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
                    })),
                )
            }),
        );
        let base = spawn_mock(router).await;

        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "k").with_base_url(base);
        match gemini.generate("ping").await.unwrap_err() {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let router = Router::new().route("/models/:action", post(|| async { "not json" }));
        let base = spawn_mock(router).await;

        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "k").with_base_url(base);
        let err = gemini.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_transport_error() {
        // Bind then drop so the port is (almost certainly) closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gemini = GeminiCompletion::new(DEFAULT_GEMINI_MODEL, "k")
            .with_base_url(format!("http://{}", addr));
        let err = gemini.generate("ping").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}
