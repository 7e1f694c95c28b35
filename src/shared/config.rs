//! Application configuration. Provider credentials, paths, limits.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_AI_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "google/gemini-2.0-pro-exp-02-05:free";
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // AI Provider Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Provider API key. Read from CALORIE_SNAP_AI_API_KEY. Unset = mock provider.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Chat-completions URL. Read from CALORIE_SNAP_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model id. Read from CALORIE_SNAP_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// `HTTP-Referer` header value. Read from CALORIE_SNAP_APP_REFERER.
    #[serde(default)]
    pub app_referer: Option<String>,

    /// `X-Title` header value. Read from CALORIE_SNAP_APP_TITLE.
    #[serde(default)]
    pub app_title: Option<String>,

    /// Optional completion token cap. Not sent when unset.
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// HTTP client timeout in seconds (default 60).
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    /// Simulated latency of the mock provider (default 300ms).
    #[serde(default)]
    pub mock_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Local Storage & Limits
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory for users.json. Read from CALORIE_SNAP_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Largest accepted image file (default 10 MiB).
    #[serde(default)]
    pub max_image_bytes: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("CALORIE_SNAP").try_parsing(true));
        if let Ok(path) = std::env::var("CALORIE_SNAP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the provider API key if configured and non-blank.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    pub fn app_referer_or_default(&self) -> String {
        self.app_referer
            .clone()
            .unwrap_or_else(|| "calorie-snap".to_string())
    }

    pub fn app_title_or_default(&self) -> String {
        self.app_title
            .clone()
            .unwrap_or_else(|| "Calories Tracker App".to_string())
    }

    pub fn http_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(60))
    }

    pub fn mock_delay_ms_or_default(&self) -> u64 {
        self.mock_delay_ms.unwrap_or(300)
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn max_image_bytes_or_default(&self) -> u64 {
        self.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    /// Returns true if a real provider is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.is_ai_configured());
        assert_eq!(cfg.ai_api_url_or_default(), DEFAULT_AI_API_URL);
        assert_eq!(cfg.ai_model_or_default(), DEFAULT_AI_MODEL);
        assert_eq!(cfg.http_timeout_or_default(), Duration::from_secs(60));
        assert_eq!(cfg.max_image_bytes_or_default(), DEFAULT_MAX_IMAGE_BYTES);
        assert_eq!(cfg.data_dir_or_default(), PathBuf::from("./data"));
    }

    #[test]
    fn test_blank_key_is_unconfigured() {
        let cfg = AppConfig {
            ai_api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!cfg.is_ai_configured());
    }

    #[test]
    fn test_deserialize_from_source() {
        let cfg: AppConfig = config::Config::builder()
            .set_override("ai_model", "openai/gpt-4o-mini")
            .unwrap()
            .set_override("max_image_bytes", 2048_i64)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.ai_model_or_default(), "openai/gpt-4o-mini");
        assert_eq!(cfg.max_image_bytes_or_default(), 2048);
    }
}
