//! Analysis service. The pipeline's single entry point.
//!
//! image payload → request builder → provider port → response decoder.

use crate::adapters::ai::{build_request, decode};
use crate::adapters::media::load_image_data_uri;
use crate::domain::{AnalysisFailure, AnalysisOutcome};
use crate::ports::ProviderPort;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for meal-photo analysis.
///
/// Stateless apart from the provider handle, so concurrent calls need no
/// coordination. Never returns an error: failures are error outcomes.
pub struct AnalysisService {
    provider: Arc<dyn ProviderPort>,
    max_image_bytes: u64,
}

impl AnalysisService {
    /// # Arguments
    /// * `provider` - Provider port implementation (OpenRouter, Mock, etc.)
    /// * `max_image_bytes` - Upper bound for files passed to `analyze_file`
    pub fn new(provider: Arc<dyn ProviderPort>, max_image_bytes: u64) -> Self {
        Self {
            provider,
            max_image_bytes,
        }
    }

    /// Analyze a base64 image (bare or data URI).
    pub async fn analyze(&self, image_base64: &str) -> AnalysisOutcome {
        info!(image_len = image_base64.len(), "analyzing meal photo");

        let request = build_request(image_base64);
        match self.provider.send(&request).await {
            Ok(raw) => decode(&raw),
            Err(e) => {
                warn!(error = %e, "provider call failed");
                AnalysisFailure::from(e).into()
            }
        }
    }

    /// Load an image file and analyze it.
    pub async fn analyze_file(&self, path: &Path) -> AnalysisOutcome {
        match load_image_data_uri(path, self.max_image_bytes).await {
            Ok(data_uri) => self.analyze(&data_uri).await,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load image");
                AnalysisFailure::from(e).into()
            }
        }
    }
}
