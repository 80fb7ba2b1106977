// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use reliability_dashboard::application::alert_limiter::AlertLimiter;
use reliability_dashboard::application::asset_repository::AssetRepository;
use reliability_dashboard::application::asset_service::AssetService;
use reliability_dashboard::application::notification_service::AlertService;
use reliability_dashboard::infrastructure::config::load_app_config;
use reliability_dashboard::infrastructure::log_notifier::LogNotifier;
use reliability_dashboard::infrastructure::memory_repository::InMemoryAssetRepository;
use reliability_dashboard::infrastructure::seed;
use reliability_dashboard::presentation::app_state::AppState;
use reliability_dashboard::presentation::routes::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemoryAssetRepository::new());
    if config.seed.demo_assets {
        let assets = seed::demo_assets(Utc::now());
        tracing::info!(count = assets.len(), "Seeding demo assets");
        repository.put_many(assets).await?;
    }

    // Create services (application layer)
    let cooldown = config.alerts.cooldown()?;
    let notifier = Arc::new(LogNotifier::new(Some(config.alerts.recipient.clone())));
    let alerts = AlertService::new(notifier, AlertLimiter::new(cooldown));
    let asset_service = AssetService::new(repository, alerts, config.telemetry.history_limit);

    // Create application state
    let state = Arc::new(AppState { asset_service });

    // Build router (presentation layer)
    let router = create_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!(%addr, "Starting reliability-dashboard service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
