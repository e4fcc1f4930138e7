//! Google Gemini client (`generateContent` REST API)
//!
//! System instructions travel in the dedicated `systemInstruction` field and
//! assistant turns use Gemini's `model` role. The API key is sent as the
//! `key` query parameter, so transport errors are stripped of their URL
//! before they reach logs.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::config::ConfigError;
use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, MessageRole, TokenUsage,
};

/// Public Gemini REST endpoint.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Value shipped in sample env files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    /// Create a client. Fails if the key is blank or still the placeholder.
    pub fn new(api_key: &str, model: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::MissingApiKey("GEMINI_API_KEY"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Point the client at a different endpoint root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmPort for GeminiClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let body = build_request(&request);

        tracing::debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(map_api_error(status, &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse Gemini response: {e}")))?;

        convert_response(parsed)
    }
}

fn build_request(request: &LlmRequest) -> GeminiRequest {
    let contents = request
        .messages
        .iter()
        .map(|msg| GeminiContent {
            role: Some(
                match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                }
                .to_string(),
            ),
            parts: vec![GeminiPart {
                text: msg.content.clone(),
            }],
        })
        .collect();

    GeminiRequest {
        contents,
        system_instruction: request.system_prompt.as_ref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: text.clone() }],
        }),
        generation_config: request.temperature.map(|temperature| GenerationConfig {
            temperature: Some(temperature),
        }),
    }
}

fn convert_response(response: GeminiResponse) -> Result<LlmResponse, LlmError> {
    if let Some(error) = response.error {
        return Err(LlmError::RequestFailed(format!(
            "Gemini API error: {}",
            error.message
        )));
    }

    let candidate = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No candidates in Gemini response".into()))?;

    let content = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") | Some("SPII") => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Unknown,
    };

    // Blocked candidates carry no content
    if content.trim().is_empty() {
        return Err(LlmError::InvalidResponse(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("none")
        )));
    }

    Ok(LlmResponse {
        content,
        finish_reason,
        usage: response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count.unwrap_or(0),
            completion_tokens: u.candidates_token_count.unwrap_or(0),
            total_tokens: u.total_token_count.unwrap_or(0),
        }),
    })
}

fn map_api_error(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<GeminiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Unauthorized(format!("Gemini API error ({status}): {message}"))
        }
        // Gemini answers 400 with API_KEY_INVALID for a bad key
        StatusCode::BAD_REQUEST if message.contains("API key") => {
            LlmError::Unauthorized(format!("Gemini API error ({status}): {message}"))
        }
        _ => LlmError::RequestFailed(format!("Gemini API error ({status}): {message}")),
    }
}

// =============================================================================
// Gemini API types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;
    use crate::test_fixtures::spawn_stub_server;
    use axum::{
        extract::{Path, Query},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[test]
    fn test_rejects_missing_or_placeholder_key() {
        assert!(GeminiClient::new("", DEFAULT_GEMINI_MODEL).is_err());
        assert!(GeminiClient::new("   ", DEFAULT_GEMINI_MODEL).is_err());
        assert!(GeminiClient::new(PLACEHOLDER_API_KEY, DEFAULT_GEMINI_MODEL).is_err());
        assert!(GeminiClient::new("real-key", DEFAULT_GEMINI_MODEL).is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GeminiClient::new("secret-key", DEFAULT_GEMINI_MODEL).expect("valid key");
        assert!(!format!("{client:?}").contains("secret-key"));
    }

    #[test]
    fn test_request_body_shape() {
        let request = LlmRequest::new(vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Welcome! [NEUTRAL]"),
            ChatMessage::user("Thanks!"),
        ])
        .with_system_prompt("You are a friendly character in a Playground.")
        .with_temperature(0.2);

        let body = serde_json::to_value(build_request(&request)).expect("serializable");

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are a friendly character in a Playground."
        );
        let roles: Vec<&str> = body["contents"]
            .as_array()
            .map(|c| c.iter().filter_map(|m| m["role"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert!(body["systemInstruction"].get("role").is_none());
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_response_joins_text_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "there! [HAPPY]"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 5, "totalTokenCount": 9}
        }))
        .expect("valid response");

        let converted = convert_response(response).expect("has candidate");
        assert_eq!(converted.content, "Hello there! [HAPPY]");
        assert_eq!(converted.usage.map(|u| u.total_tokens), Some(9));
    }

    #[test]
    fn test_empty_candidates_are_invalid() {
        let response: GeminiResponse =
            serde_json::from_value(json!({"candidates": []})).expect("valid response");
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_safety_block_without_text_is_invalid() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .expect("valid response");

        let err = convert_response(response).expect_err("blocked candidate");
        assert!(matches!(&err, LlmError::InvalidResponse(msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn test_blank_text_parts_are_invalid() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}, "finishReason": "STOP"}]
        }))
        .expect("valid response");

        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_forbidden_maps_to_unauthorized() {
        let body = r#"{"error": {"message": "Permission denied"}}"#;
        assert!(matches!(
            map_api_error(StatusCode::FORBIDDEN, body),
            LlmError::Unauthorized(_)
        ));
        assert!(matches!(
            map_api_error(StatusCode::SERVICE_UNAVAILABLE, body),
            LlmError::RequestFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_generate_against_stub_server() {
        let router = Router::new().route(
            "/models/{call}",
            post(
                |Path(call): Path<String>,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    let text = format!(
                        "{}|{}|{}",
                        call,
                        query.get("key").cloned().unwrap_or_default(),
                        body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default()
                    );
                    Json(json!({
                        "candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]
                    }))
                },
            ),
        );
        let base_url = spawn_stub_server(router).await;

        let client = GeminiClient::new("stub-key", "gemini-test")
            .expect("valid key")
            .with_base_url(&base_url);
        let response = client
            .generate(LlmRequest::new(vec![ChatMessage::user("Hello")]))
            .await
            .expect("stub answers");

        assert_eq!(response.content, "gemini-test:generateContent|stub-key|Hello");
    }
}
