//! Data Transfer Objects
//!
//! Request and response types for the JSON endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rollup::{CategoryRollupRow, DailyRollupRow};

// ============================================
// SUMMARY DTOs
// ============================================

/// Headline numbers
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Sum of daily distinct-order counts
    pub total_orders: u64,
    /// Sum of daily revenue
    pub total_revenue: Decimal,
    /// Revenue formatted with the configured currency and locale
    pub total_revenue_formatted: String,
    pub currency: String,
    pub locale: String,
    /// Number of days in the daily rollup
    pub days: usize,
    /// Number of categories in the category rollup
    pub categories: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
}

// ============================================
// ROLLUP DTOs
// ============================================

/// Body format of the daily rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyFormat {
    #[default]
    Json,
    Csv,
}

/// Query parameters for the daily rollup
#[derive(Debug, Default, Deserialize)]
pub struct DailyParams {
    #[serde(default)]
    pub format: DailyFormat,
}

/// Daily rollup response
#[derive(Debug, Serialize)]
pub struct DailyRollupResponse {
    pub rows: Vec<DailyRollupRow>,
}

/// Sort direction of the category rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Query parameters for the category rollup
#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    #[serde(default)]
    pub order: SortOrder,
    /// Keep only the first N rows after sorting
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Category rollup response
#[derive(Debug, Serialize)]
pub struct CategoryRollupResponse {
    pub order: SortOrder,
    pub rows: Vec<CategoryRollupRow>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Configured dataset location
    pub source: String,
    pub uptime_seconds: u64,
    pub version: String,
}
