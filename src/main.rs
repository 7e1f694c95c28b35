//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.
//!
//! `calorie-snap` runs the interactive TUI; `calorie-snap <image>` analyzes one
//! file and prints the outcome as JSON.

use calorie_snap::adapters::ai::{MockProviderAdapter, OpenRouterAdapter, OpenRouterSettings};
use calorie_snap::adapters::persistence::JsonUserStore;
use calorie_snap::adapters::ui::tui::TuiInputPort;
use calorie_snap::ports::{InputPort, ProviderPort, UserStorePort};
use calorie_snap::shared::config::AppConfig;
use calorie_snap::usecases::{AnalysisService, SessionService};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Provider: real endpoint when a key is set, mock otherwise ---
    let (provider, provider_label): (Arc<dyn ProviderPort>, String) = match cfg.ai_api_key() {
        Some(api_key) => {
            info!(
                model = %cfg.ai_model_or_default(),
                url = %cfg.ai_api_url_or_default(),
                "AI analysis enabled with OpenRouter adapter"
            );
            let adapter = OpenRouterAdapter::new(OpenRouterSettings {
                api_url: cfg.ai_api_url_or_default(),
                api_key,
                model: cfg.ai_model_or_default(),
                referer: cfg.app_referer_or_default(),
                title: cfg.app_title_or_default(),
                max_tokens: cfg.max_tokens,
                timeout: cfg.http_timeout_or_default(),
            })
            .map_err(|e| anyhow::anyhow!("{}", e))?;
            (Arc::new(adapter), cfg.ai_model_or_default())
        }
        None => {
            warn!("CALORIE_SNAP_AI_API_KEY not set, using mock provider");
            (
                Arc::new(MockProviderAdapter::with_delay(cfg.mock_delay_ms_or_default())),
                "mock provider".to_string(),
            )
        }
    };

    let analysis_service = Arc::new(AnalysisService::new(
        provider,
        cfg.max_image_bytes_or_default(),
    ));

    // --- One-shot mode ---
    if let Some(image) = std::env::args().nth(1) {
        let outcome = analysis_service.analyze_file(&PathBuf::from(image)).await;
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if outcome.is_error() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // --- Session store ---
    let data_dir = cfg.data_dir_or_default();
    let store_impl = JsonUserStore::new(data_dir.join("users.json"));
    store_impl
        .load()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let store: Arc<dyn UserStorePort> = Arc::new(store_impl);
    let session_service = Arc::new(SessionService::new(store));

    calorie_snap::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        analysis_service,
        session_service,
        provider_label,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
