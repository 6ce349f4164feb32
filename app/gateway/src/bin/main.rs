//! ffai gateway binary entry point.
//!
//! Loads TOML configuration, constructs the memory backend and Gemini
//! provider, and runs the axum server with graceful shutdown on ctrl-c.

use anyhow::Result;
use ffai_gateway::GatewayConfig;
use std::path::Path;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration; a missing file falls back to defaults.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gateway.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        let config = GatewayConfig::load(Path::new(&config_path))?;
        tracing::info!("loaded configuration from {config_path}");
        config
    } else {
        tracing::info!("no configuration at {config_path}, using defaults");
        GatewayConfig::default()
    };

    let bind = config.bind_address();
    let handle = ffai_gateway::serve_with_config(&config, &bind).await?;

    signal::ctrl_c().await?;
    tracing::info!("received ctrl-c");
    handle.shutdown().await?;
    tracing::info!("gateway shut down");
    Ok(())
}
