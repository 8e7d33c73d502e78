//! pumpwatch - pump.fun creation-stream sniper - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

/// Watch a Solana stream for pump.fun token creations and price them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PUMPWATCH_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Watched participant address (base58); overrides the config file
    #[arg(long)]
    watch: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    pumpwatch_ws::init_crypto();

    let args = Args::parse();

    // Determine config path: CLI arg > PUMPWATCH_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PUMPWATCH_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let mut config = if std::path::Path::new(&config_path).exists() {
        pumpwatch_bot::AppConfig::from_file(&config_path)?
    } else {
        pumpwatch_bot::AppConfig::default()
    };
    if let Some(watch) = args.watch {
        config.watched_address = Some(watch);
    }

    pumpwatch_telemetry::init_logging(&config.log_directives)?;
    info!("starting pumpwatch v{}", env!("CARGO_PKG_VERSION"));
    if !std::path::Path::new(&config_path).exists() {
        warn!(path = %config_path, "config file not found, using defaults");
    }
    info!(
        config_path = %config_path,
        mode = ?config.mode,
        ws_url = %config.ws_url,
        "configuration loaded"
    );

    let app = pumpwatch_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
