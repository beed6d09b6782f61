//! Chart Routes
//!
//! Individual chart images, each rendered from a fresh load.
//!
//! - GET /charts/daily-orders.svg - Order count over the full range
//! - GET /charts/categories.svg - Best and worst performing categories
//! - GET /charts/window.svg - Windowed order count with max annotation

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

fn svg_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], body).into_response()
}

/// GET /charts/daily-orders.svg
pub async fn daily_orders_chart(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let dashboard = state.dashboard().await?;
    Ok(svg_response(dashboard.daily_chart()))
}

/// GET /charts/categories.svg
pub async fn categories_chart(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let dashboard = state.dashboard().await?;
    Ok(svg_response(dashboard.category_chart()))
}

/// GET /charts/window.svg
pub async fn window_chart(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let dashboard = state.dashboard().await?;
    Ok(svg_response(dashboard.window_chart()))
}
