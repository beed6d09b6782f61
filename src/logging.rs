//! Logging Setup
//!
//! Installs the global `tracing` subscriber from [`LoggingConfig`].
//! `RUST_LOG`, when set, takes precedence over the configured level.

use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Build the filter: `RUST_LOG` first, then the configured level for this
/// crate plus HTTP tracing
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "storefront={level},tower_http={level}",
            level = config.level
        ))
    })
}

/// Install the global subscriber.
///
/// `format = "json"` emits one JSON object per line, anything else the
/// human-readable format. With `file` set, output is appended to that file
/// instead of stderr.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let json = config.format.eq_ignore_ascii_case("json");

    let layer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let writer = Mutex::new(file);
            if json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed()
            }
        }
        None if json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        None => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(layer)
        .init();

    Ok(())
}
