//! PD Engine Server - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.server)?;

    info!("=== PD Engine Server v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Fusion weights: HFCT {}, TEV {}, Ultrasonic {}",
        config.engine.fusion.hfct, config.engine.fusion.tev, config.engine.fusion.ultrasonic
    );

    run_server(config).await?;

    Ok(())
}
