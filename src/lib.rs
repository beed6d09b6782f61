//! # Storefront
//!
//! E-commerce order dashboard: loads an order line-item CSV, rolls it up into
//! daily order/revenue totals and per-category sales counts, and serves the
//! result as headline metrics and charts.
//!
//! ## Modules
//!
//! - [`data`]: CSV loading from a file or URL
//! - [`rollup`]: pure daily and category aggregations
//! - [`present`]: currency formatting, SVG charts, the HTML page
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storefront::data::{load_orders, DataSource};
//! use storefront::rollup::{category_rollup, daily_rollup, HeadlineTotals};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DataSource::parse("dashboard/all_data.csv");
//!     let orders = load_orders(&source, &reqwest::Client::new()).await?;
//!
//!     let daily = daily_rollup(&orders);
//!     let totals = HeadlineTotals::from_daily(&daily);
//!     println!("{} orders over {} days", totals.total_orders, daily.len());
//!
//!     for row in category_rollup(&orders).iter().take(5) {
//!         println!("{}: {}", row.category, row.number_of_sales);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod logging;
pub mod present;
pub mod rollup;

// Re-export top-level types for convenience
pub use data::{load_orders, parse_orders, DataSource, LoadError, OrderRecord, OrderTable};

pub use rollup::{
    best_performing, category_rollup, daily_rollup, worst_performing, CategoryRollupRow,
    DailyRollupRow, HeadlineTotals,
};

pub use present::{CurrencyError, CurrencyFormatter, Dashboard, DashboardSettings};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    generate_default_config, ApiConfig, Config, ConfigError, ConfigOrigin, DisplayConfig,
    LoggingConfig, SourceConfig,
};
