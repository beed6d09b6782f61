//! Storefront Dashboard Server
//!
//! Run with: cargo run --bin storefront
//!
//! # Configuration
//!
//! Read from `--config`, or the first of
//! `~/.config/storefront/config.toml`, `/etc/storefront/config.toml`,
//! `./config.toml`. Environment variables override file settings:
//! - `STOREFRONT_SOURCE`: Order CSV path or URL
//! - `STOREFRONT_HOST` / `STOREFRONT_PORT`: Bind address (default: 0.0.0.0:8501)
//! - `STOREFRONT_CURRENCY` / `STOREFRONT_LOCALE`: Revenue formatting (default: AUD / es_CO)
//! - `STOREFRONT_LOG_LEVEL` / `STOREFRONT_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter (overrides the level)

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use storefront::api::{serve, AppState};
use storefront::config::{Config, ConfigOrigin};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "E-commerce order dashboard server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Order CSV path or URL (overrides config)
    #[arg(short, long)]
    source: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (mut config, origin) = match &args.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            let origin = ConfigOrigin::File {
                path: path.clone(),
                skipped: Vec::new(),
            };
            (config, origin)
        }
        None => Config::load_default(),
    };
    if let Some(source) = args.source {
        config.source.location = source;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    storefront::logging::init(&config.logging).context("initializing logging")?;
    origin.log();

    tracing::info!("Starting Storefront dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Order source: {}", config.source.location);
    tracing::info!(
        "Revenue format: {} / {}",
        config.display.currency,
        config.display.locale
    );

    let api_config = config.api.clone();
    let state = AppState::new(config)?;

    serve(state, &api_config).await?;

    tracing::info!("Storefront dashboard stopped");
    Ok(())
}
