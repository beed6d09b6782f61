//! Application State
//!
//! Shared state accessible by all handlers. It holds only settings and
//! the HTTP client: every request reloads the dataset and recomputes the
//! rollups from scratch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::data::{load_orders, DataSource};
use crate::present::{Dashboard, DashboardSettings};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Full configuration
    pub config: Arc<Config>,
    /// Where the order CSV is read from
    pub source: DataSource,
    /// Resolved presentation settings
    pub settings: DashboardSettings,
    /// Client for remote datasets
    pub client: reqwest::Client,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Validate the configuration and build the state
    pub fn new(config: Config) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let settings = DashboardSettings::from_config(&config.display)
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.source.fetch_timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self {
            source: config.source.data_source(),
            config: Arc::new(config),
            settings,
            client,
            start_time: Instant::now(),
        })
    }

    /// Load the dataset and compute every rollup
    pub async fn dashboard(&self) -> ApiResult<Dashboard> {
        let orders = load_orders(&self.source, &self.client).await?;
        Ok(Dashboard::build(&orders, &self.settings))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
