//! pingreport binary entry point.
//!
//! Runs a single probe/log/report pass. Every failure is logged; the process
//! always exits with status 0.

use pingreport::{AppConfig, Runner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pingreport=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("pingreport - host latency report");

    let config = AppConfig::load();
    match serde_json::to_string(&config) {
        Ok(json) => tracing::debug!(config = %json, "Configuration loaded"),
        Err(e) => tracing::warn!(error = %e, "Failed to serialize configuration"),
    }

    let summary = Runner::from_config(config).run().await;
    if !summary.is_clean() {
        tracing::warn!("Run completed with errors");
    }
}
