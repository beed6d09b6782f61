//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::data::DataSource;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Order dataset location
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Local path or HTTP(S) URL of the order CSV
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_location() -> String {
    "https://raw.githubusercontent.com/fityannn/Project-Akhir/refs/heads/main/dashboard/all_data.csv"
        .to_string()
}

fn default_fetch_timeout() -> u64 {
    60
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.location)
    }
}

/// Presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// ISO 4217 code of the revenue headline
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Locale used for number layout and currency symbol
    #[serde(default = "default_locale")]
    pub locale: String,

    /// First day of the annotated chart (inclusive)
    #[serde(default = "default_window_start")]
    pub window_start: NaiveDate,

    /// Last day of the annotated chart (inclusive)
    #[serde(default = "default_window_end")]
    pub window_end: NaiveDate,

    /// Categories shown in each of the best/worst charts
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default = "default_window_title")]
    pub window_title: String,

    #[serde(default = "default_window_caption")]
    pub window_caption: String,
}

fn default_currency() -> String {
    "AUD".to_string()
}

fn default_locale() -> String {
    "es_CO".to_string()
}

fn default_window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 9, 1).unwrap_or_default()
}

fn default_window_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 8, 31).unwrap_or_default()
}

fn default_top_n() -> usize {
    5
}

fn default_window_title() -> String {
    "Pembelian dari 2017 sampai 2018".to_string()
}

fn default_window_caption() -> String {
    "Visualisasi jumlah pesanan dari bulan September 2017 hingga Agustus 2018.".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            locale: default_locale(),
            window_start: default_window_start(),
            window_end: default_window_end(),
            top_n: default_top_n(),
            window_title: default_window_title(),
            window_caption: default_window_caption(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// Nothing is logged here since logging is configured from the result;
    /// the returned [`ConfigOrigin`] says what happened.
    pub fn load_default() -> (Self, ConfigOrigin) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("storefront").join("config.toml")),
            Some(PathBuf::from("/etc/storefront/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first existing file among `paths`, falling back to defaults
    fn load_first(paths: &[PathBuf]) -> (Self, ConfigOrigin) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => return (config, ConfigOrigin::File { path: path.clone(), skipped }),
                Err(e) => skipped.push((path.clone(), e)),
            }
        }

        (Self::from_env(), ConfigOrigin::Defaults { skipped })
    }

    /// Reject settings that cannot produce a dashboard
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.window_start > self.display.window_end {
            return Err(ConfigError::Invalid(format!(
                "display.window_start ({}) is after display.window_end ({})",
                self.display.window_start, self.display.window_end
            )));
        }

        if self.source.location.trim().is_empty() {
            return Err(ConfigError::Invalid("source.location is empty".to_string()));
        }

        crate::present::CurrencyFormatter::new(&self.display.currency, &self.display.locale)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Source overrides
        if let Ok(location) = std::env::var("STOREFRONT_SOURCE") {
            self.source.location = location;
        }

        // Display overrides
        if let Ok(currency) = std::env::var("STOREFRONT_CURRENCY") {
            self.display.currency = currency;
        }
        if let Ok(locale) = std::env::var("STOREFRONT_LOCALE") {
            self.display.locale = locale;
        }

        // API overrides
        if let Ok(host) = std::env::var("STOREFRONT_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("STOREFRONT_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("STOREFRONT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STOREFRONT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where [`Config::load_default`] found its settings
#[derive(Debug)]
pub enum ConfigOrigin {
    File {
        path: PathBuf,
        /// Earlier candidates that exist but failed to load
        skipped: Vec<(PathBuf, ConfigError)>,
    },
    Defaults {
        skipped: Vec<(PathBuf, ConfigError)>,
    },
}

impl ConfigOrigin {
    /// Report the outcome; call once the subscriber is installed
    pub fn log(&self) {
        let skipped = match self {
            ConfigOrigin::File { skipped, .. } | ConfigOrigin::Defaults { skipped } => skipped,
        };
        for (path, error) in skipped {
            tracing::warn!("Failed to load config from {:?}: {}", path, error);
        }

        match self {
            ConfigOrigin::File { path, .. } => tracing::info!("Loaded config from {:?}", path),
            ConfigOrigin::Defaults { .. } => {
                tracing::info!("Using default config with environment overrides")
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Storefront Configuration
#
# Environment variables override these settings:
# - STOREFRONT_SOURCE
# - STOREFRONT_CURRENCY
# - STOREFRONT_LOCALE
# - STOREFRONT_HOST
# - STOREFRONT_PORT
# - STOREFRONT_LOG_LEVEL
# - STOREFRONT_LOG_FORMAT

[source]
# Local path or HTTP(S) URL of the order CSV
location = "https://raw.githubusercontent.com/fityannn/Project-Akhir/refs/heads/main/dashboard/all_data.csv"

# Timeout for fetching a remote dataset (seconds)
fetch_timeout_secs = 60

[display]
# Currency code and locale of the revenue headline
currency = "AUD"
locale = "es_CO"

# Date window of the annotated chart (inclusive)
window_start = "2017-09-01"
window_end = "2018-08-31"

# Categories shown in each of the best/worst charts
top_n = 5

window_title = "Pembelian dari 2017 sampai 2018"
window_caption = "Visualisasi jumlah pesanan dari bulan September 2017 hingga Agustus 2018."

[api]
# Server host
host = "0.0.0.0"

# Server port
port = 8501

# Allowed CORS origins (empty = any)
cors_origins = []

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/storefront/storefront.log"
"#
    .to_string()
}
