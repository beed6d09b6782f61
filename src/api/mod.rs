//! Storefront HTTP Server
//!
//! Serves the dashboard and its data, built with Axum. Every request runs
//! the whole pipeline (load → aggregate → render) again; nothing is cached
//! between requests.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - HTML dashboard
//!
//! ## Charts
//! - `GET /charts/daily-orders.svg` - Daily order count
//! - `GET /charts/categories.svg` - Best & worst performing categories
//! - `GET /charts/window.svg` - Windowed order count with max annotation
//!
//! ## Data
//! - `GET /api/v1/summary` - Headline totals
//! - `GET /api/v1/rollups/daily` - Daily rollup (`?format=json|csv`)
//! - `GET /api/v1/rollups/categories` - Category rollup (`?order=desc|asc&limit=N`)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::api::{serve, AppState};
//! use storefront::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _origin) = Config::load_default();
//!     let api_config = config.api.clone();
//!
//!     let state = AppState::new(config)?;
//!     serve(state, &api_config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.api.cors_origins);

    let api_routes = Router::new()
        .route("/summary", get(routes::rollups::summary))
        .route("/rollups/daily", get(routes::rollups::daily))
        .route("/rollups/categories", get(routes::rollups::categories));

    let chart_routes = Router::new()
        .route("/daily-orders.svg", get(routes::charts::daily_orders_chart))
        .route("/categories.svg", get(routes::charts::categories_chart))
        .route("/window.svg", get(routes::charts::window_chart));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/charts", chart_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    }
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let source = state.source.to_string();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(source = %source, "Storefront dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Storefront shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::SummaryResponse;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tower::util::ServiceExt;

    const ORDERS_CSV: &str = "order_id,order_item_id,product_category_name,price,shipping_limit_date
o1,1,beleza_saude,10.00,2017-09-01 10:00:00
o1,2,beleza_saude,5.50,2017-09-01 10:00:00
o2,1,cama_mesa_banho,20.00,2017-09-01 12:00:00
o3,1,beleza_saude,7.25,2017-09-03 08:30:00
o4,1,brinquedos,1.25,2017-09-03 09:00:00
o5,1,,3.00,2017-09-04 09:00:00
";

    fn create_test_app(csv: &str) -> (Router, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let mut config = Config::default();
        config.source.location = file.path().to_string_lossy().to_string();

        let state = AppState::new(config).unwrap();
        (build_router(state), file)
    }

    fn create_url_app(url: String) -> Router {
        let mut config = Config::default();
        config.source.location = url;
        build_router(AppState::new(config).unwrap())
    }

    async fn spawn_dataset_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _file) = create_test_app(ORDERS_CSV);
        let (status, _, _) = fetch(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, file) = create_test_app(ORDERS_CSV);
        let (status, _, body) = fetch(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["source"], file.path().to_str().unwrap());
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (app, _file) = create_test_app(ORDERS_CSV);
        let (status, content_type, body) = fetch(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert!(body.contains("Total orders"));
        assert!(body.contains("AU$\u{a0}47,00"));
        assert!(body.contains("Best Performing Product"));
        assert!(body.contains("Max: 2"));
    }

    #[tokio::test]
    async fn test_summary() {
        let (app, _file) = create_test_app(ORDERS_CSV);
        let (status, _, body) = fetch(app, "/api/v1/summary").await;

        assert_eq!(status, StatusCode::OK);
        let summary: SummaryResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.total_revenue, dec!(47.00));
        assert_eq!(summary.currency, "AUD");
        assert_eq!(summary.locale, "es_CO");
        assert_eq!(summary.days, 4);
        assert_eq!(summary.categories, 3);
    }

    #[tokio::test]
    async fn test_daily_rollup_json_and_csv() {
        let (app, _file) = create_test_app(ORDERS_CSV);
        let (status, _, body) = fetch(app.clone(), "/api/v1/rollups/daily").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let counts: Vec<u64> = json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["order_count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, vec![2, 0, 2, 1]);

        let (status, content_type, body) = fetch(app, "/api/v1/rollups/daily?format=csv").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("text/csv"));
        assert!(body.starts_with("date,order_count,revenue\n2017-09-01,2,35.50\n"));
    }

    #[tokio::test]
    async fn test_daily_rollup_bad_format() {
        let (app, _file) = create_test_app(ORDERS_CSV);
        let (status, _, body) = fetch(app, "/api/v1/rollups/daily?format=xml").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn test_category_rollup_bad_query_is_json_error() {
        let (app, _file) = create_test_app(ORDERS_CSV);

        for uri in [
            "/api/v1/rollups/categories?order=sideways",
            "/api/v1/rollups/categories?limit=-1",
        ] {
            let (status, content_type, body) = fetch(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(content_type.as_deref(), Some("application/json"));
            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_category_rollup_orders() {
        let (app, _file) = create_test_app(ORDERS_CSV);

        let (_, _, body) = fetch(app.clone(), "/api/v1/rollups/categories").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["order"], "desc");
        assert_eq!(json["rows"][0]["category"], "beleza_saude");
        assert_eq!(json["rows"][0]["number_of_sales"], 2);
        assert_eq!(json["rows"].as_array().unwrap().len(), 3);

        let (_, _, body) = fetch(app, "/api/v1/rollups/categories?order=asc&limit=2").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let names: Vec<&str> = json["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["category"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["brinquedos", "cama_mesa_banho"]);
    }

    #[tokio::test]
    async fn test_chart_endpoints() {
        let (app, _file) = create_test_app(ORDERS_CSV);

        for uri in ["/charts/daily-orders.svg", "/charts/categories.svg", "/charts/window.svg"] {
            let (status, content_type, body) = fetch(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
            assert!(body.starts_with("<svg"));
        }
    }

    #[tokio::test]
    async fn test_missing_source_fails_page() {
        let mut config = Config::default();
        config.source.location = "/nonexistent/orders.csv".to_string();
        let app = build_router(AppState::new(config).unwrap());

        let (status, _, body) = fetch(app, "/").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("SOURCE_UNAVAILABLE"));
    }

    #[tokio::test]
    async fn test_remote_source() {
        let dataset = Router::new().route("/all_data.csv", get(|| async { ORDERS_CSV }));
        let base = spawn_dataset_server(dataset).await;
        let app = create_url_app(format!("{}/all_data.csv", base));

        let (status, _, body) = fetch(app.clone(), "/api/v1/summary").await;
        assert_eq!(status, StatusCode::OK);
        let summary: SummaryResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(summary.total_orders, 5);

        let (status, _, body) = fetch(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/all_data.csv"));
    }

    #[tokio::test]
    async fn test_remote_source_not_found_is_bad_gateway() {
        let base = spawn_dataset_server(Router::new()).await;
        let app = create_url_app(format!("{}/all_data.csv", base));

        let (status, _, body) = fetch(app, "/").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "SOURCE_UNAVAILABLE");
        assert!(json["error"]["message"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_malformed_data_fails_page() {
        let (app, _file) = create_test_app("order_id,price\no1,1.0\n");
        let (status, _, body) = fetch(app, "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("DATA_ERROR"));
    }
}
