//! HealthPredict - Main Entry Point
//!
//! Usage: `healthpredict [CONFIG_FILE]`

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("=== HealthPredict v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
