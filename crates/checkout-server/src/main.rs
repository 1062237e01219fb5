//! chimoney-checkout HTTP Server
//!
//! Axum-based server that proxies checkout requests to Chimoney and receives
//! its webhooks.

mod config;
mod envelope;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_payments::{ChimoneyClient, MemoryDeliveryLog};

use crate::config::ServerConfig;
use crate::routes::{router, ENDPOINTS};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Initialize payments
    if config.chimoney.uses_placeholder_key() {
        tracing::warn!("⚠ API_KEY not set - using placeholder, Chimoney will reject requests");
    } else {
        tracing::info!("✓ Chimoney API key configured");
    }
    tracing::info!(base_url = %config.chimoney.base_url, timeout_secs = config.chimoney.timeout_secs, "Upstream");

    let provider = Arc::new(ChimoneyClient::from_config(config.chimoney.clone())?);
    let deliveries = MemoryDeliveryLog::with_capacity(config.dedup_capacity);

    let app = router(AppState::new(provider, deliveries));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 chimoney-checkout running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    for (method, path, description) in ENDPOINTS {
        tracing::info!("  {:<5}{:<34}- {}", method, path, description);
    }

    axum::serve(listener, app).await?;

    Ok(())
}
