//! Provider wire shapes shared by the request builder, the decoder and the
//! HTTP adapter.

use serde::Serialize;
use serde_json::Value;

/// Chat-completion request without the model id (attached by the adapter).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Either a bare string or a list of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// What the HTTP layer hands back. `body` is untrusted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProviderResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Value,
}

impl RawProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
