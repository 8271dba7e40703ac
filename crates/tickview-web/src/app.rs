//! Router assembly.
//!
//! - `GET /health` - liveness and number of loaded tickers
//! - `GET /api/data` - filtered rows per ticker
//! - `GET /api/ranges` - store-wide ranges
//! - `GET /api/dashboard` - chart-ready view model

use std::time::Duration;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::routes::{dashboard, data, health};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/data", get(data::get_data))
        .route("/api/ranges", get(data::get_ranges))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("route {}", uri.path()))
}
