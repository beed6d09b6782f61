//! Order Rollups
//!
//! Pure aggregations over an [`OrderTable`](crate::data::OrderTable):
//!
//! - [`daily_rollup`]: one row per calendar day with distinct order count and
//!   summed revenue, gap-free between the first and last day
//! - [`category_rollup`]: distinct order count per product category, busiest
//!   first
//!
//! Nothing here touches I/O or rendering; every call recomputes from the full
//! table.

pub mod category;
pub mod daily;

pub use category::{best_performing, category_rollup, worst_performing, CategoryRollupRow};
pub use daily::{daily_rollup, peak, window, DailyRollupRow, HeadlineTotals};
