//! Mock provider for running without an API key.
//!
//! Returns a canned, well-formed response wrapped the way real models tend
//! to answer: a sentence of prose around a fenced JSON block.

use crate::domain::{DomainError, ProviderRequest, RawProviderResponse};
use crate::ports::ProviderPort;
use serde_json::json;
use std::time::Duration;
use tracing::info;

const MOCK_CONTENT: &str = r#"Here is my estimate for this meal:
```json
{
  "foodItems": [
    { "name": "[MOCK] Grilled chicken breast", "calories": 280, "quantity": "150", "unit": "g" },
    { "name": "[MOCK] Steamed rice", "calories": 205, "quantity": "1", "unit": "cup" },
    { "name": "[MOCK] Side salad", "calories": 45 }
  ],
  "totalCalories": 530,
  "nutritionalSummary": "[MOCK] Balanced plate: lean protein, starchy carbs and some vegetables. Configure an API key for real estimates."
}
```"#;

/// Mock provider. Simulates network latency with a configurable delay.
pub struct MockProviderAdapter {
    delay_ms: u64,
}

impl MockProviderAdapter {
    pub fn new() -> Self {
        Self { delay_ms: 300 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockProviderAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProviderPort for MockProviderAdapter {
    async fn send(&self, request: &ProviderRequest) -> Result<RawProviderResponse, DomainError> {
        info!(
            messages = request.messages.len(),
            "[MOCK] Simulating provider call"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(RawProviderResponse {
            status: 200,
            status_text: "OK".to_string(),
            body: json!({
                "id": "mock-completion",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": MOCK_CONTENT },
                    "finish_reason": "stop"
                }]
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{build_request, decode};

    #[tokio::test]
    async fn test_mock_response_decodes() {
        let adapter = MockProviderAdapter::with_delay(1);
        let raw = adapter.send(&build_request("QUJD")).await.unwrap();
        let outcome = decode(&raw);

        assert!(!outcome.is_error());
        assert_eq!(outcome.food_items().len(), 3);
        assert_eq!(outcome.total_calories(), 530.0);
        assert!(outcome.nutritional_summary().unwrap().starts_with("[MOCK]"));
    }
}
