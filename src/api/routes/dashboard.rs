//! Dashboard Page Route
//!
//! - GET / - The full HTML dashboard

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /
///
/// Loads the dataset, recomputes every rollup and renders the page
/// template.
/// Any failure aborts the whole page.
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    let dashboard = state.dashboard().await?;
    Ok(Html(dashboard.render_html()?))
}
