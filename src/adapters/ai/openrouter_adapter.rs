//! OpenAI-compatible chat-completions adapter (OpenRouter by default).
//!
//! Implements `ProviderPort`. Performs the HTTP call only; decoding is the
//! response decoder's job.

use crate::domain::{ChatMessage, DomainError, ProviderRequest, RawProviderResponse};
use crate::ports::ProviderPort;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    /// Full chat-completions URL.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Sent as `HTTP-Referer` (OpenRouter app attribution).
    pub referer: String,
    /// Sent as `X-Title`.
    pub title: String,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

pub struct OpenRouterAdapter {
    client: reqwest::Client,
    settings: OpenRouterSettings,
}

impl OpenRouterAdapter {
    pub fn new(settings: OpenRouterSettings) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }
}

/// Wire body: the built request plus the configured model.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Reason phrase for the status; non-standard codes read as "Unknown".
fn status_text(status: reqwest::StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

/// Parse the body as JSON; keep non-JSON bodies as a string value.
fn body_to_value(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait::async_trait]
impl ProviderPort for OpenRouterAdapter {
    async fn send(&self, request: &ProviderRequest) -> Result<RawProviderResponse, DomainError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: &request.messages,
            max_tokens: self.settings.max_tokens,
        };

        info!(model = %self.settings.model, url = %self.settings.api_url, "sending image to provider");

        let response = self
            .client
            .post(&self.settings.api_url)
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .header("HTTP-Referer", &self.settings.referer)
            .header("X-Title", &self.settings.title)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| DomainError::Provider(format!("Failed to read response body: {}", e)))?;

        debug!(status = %status, body_len = text.len(), "provider responded");

        Ok(RawProviderResponse {
            status: status.as_u16(),
            status_text: status_text(status),
            body: body_to_value(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::build_request;

    #[test]
    fn test_wire_body_carries_model() {
        let request = build_request("QUJD");
        let body = ChatRequest {
            model: "google/gemini-2.0-pro-exp-02-05:free",
            messages: &request.messages,
            max_tokens: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "google/gemini-2.0-pro-exp-02-05:free");
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(reqwest::StatusCode::BAD_GATEWAY), "Bad Gateway");
        let odd = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(status_text(odd), "Unknown");
    }

    #[test]
    fn test_body_to_value() {
        assert_eq!(body_to_value(r#"{"a":1}"#.to_string())["a"], 1);
        assert_eq!(
            body_to_value("Bad Gateway".to_string()),
            Value::String("Bad Gateway".to_string())
        );
    }
}
