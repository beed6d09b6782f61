//! Rollup Routes
//!
//! JSON (and CSV) views of the aggregates behind the page.
//!
//! - GET /api/v1/summary - Headline totals
//! - GET /api/v1/rollups/daily - Daily order count and revenue
//! - GET /api/v1/rollups/categories - Sales per category

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    CategoryParams, CategoryRollupResponse, DailyFormat, DailyParams, DailyRollupResponse,
    SortOrder, SummaryResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::rollup::{worst_performing, DailyRollupRow};

/// GET /api/v1/summary
pub async fn summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<SummaryResponse>> {
    let dashboard = state.dashboard().await?;

    Ok(Json(SummaryResponse {
        total_orders: dashboard.totals.total_orders,
        total_revenue: dashboard.totals.total_revenue,
        total_revenue_formatted: dashboard.total_revenue_display.clone(),
        currency: state.settings.currency.code().to_string(),
        locale: state.settings.currency.locale().to_string(),
        days: dashboard.daily.len(),
        categories: dashboard.categories.len(),
        first_day: dashboard.daily.first().map(|r| r.date),
        last_day: dashboard.daily.last().map(|r| r.date),
    }))
}

/// GET /api/v1/rollups/daily?format=json|csv
pub async fn daily(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DailyParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = params?;
    let dashboard = state.dashboard().await?;

    if params.format == DailyFormat::Csv {
        let body = daily_csv(&dashboard.daily)?;
        return Ok(([(header::CONTENT_TYPE, "text/csv")], body).into_response());
    }

    Ok(Json(DailyRollupResponse {
        rows: dashboard.daily,
    })
    .into_response())
}

/// GET /api/v1/rollups/categories?order=desc|asc&limit=N
pub async fn categories(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CategoryParams>, QueryRejection>,
) -> ApiResult<Json<CategoryRollupResponse>> {
    let Query(params) = params?;
    let dashboard = state.dashboard().await?;
    let limit = params.limit.unwrap_or(dashboard.categories.len());

    let rows = match params.order {
        SortOrder::Desc => dashboard.categories.into_iter().take(limit).collect(),
        SortOrder::Asc => worst_performing(&dashboard.categories, limit),
    };

    Ok(Json(CategoryRollupResponse {
        order: params.order,
        rows,
    }))
}

/// Serialize the daily rollup with a header row
pub fn daily_csv(rows: &[DailyRollupRow]) -> ApiResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ApiError::Internal(format!("CSV encoding: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV encoding: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV encoding: {}", e)))
}
