//! Real-time SSE event broadcast server - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod config;
mod error;
mod logging;

use config::AppConfig;

/// Real-time SSE event broadcast server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PULSE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging()?;

    info!("Starting pulse v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > PULSE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PULSE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let config = AppConfig::load(&config_path)?;
    info!(
        port = config.server.port,
        tick_interval_ms = config.server.tick_interval_ms,
        "Configuration loaded"
    );

    let channel = pulse_channel::Channel::new();
    pulse_server::run_server(channel, config.server).await?;

    Ok(())
}
