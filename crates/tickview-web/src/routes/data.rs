//! Data endpoints.
//!
//! - `GET /api/data?ticker=AAPL&start_date=..&volume_increase_threshold=..`
//! - `GET /api/ranges`
//!
//! `/api/data` answers with a JSON object keyed by ticker, each value a list
//! of row records. Tickers without matching rows are omitted, so an empty
//! result is `{}`. The outcome is also reported in the `x-tickview-status`
//! header (`rows`, `empty` or `not_found`); when every requested ticker is
//! unknown the status code is 404 and the body is still `{}`.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use serde_json::{Map, Value};
use tickview_core::{project_report, GlobalRanges, OutcomeStatus};
use tracing::{debug, warn};

use crate::routes::{raw_params, QueryPairs};
use crate::state::AppState;

pub const STATUS_HEADER: &str = "x-tickview-status";
pub const WARNINGS_HEADER: &str = "x-tickview-warnings";

/// `GET /api/data`
pub async fn get_data(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> (StatusCode, HeaderMap, Json<Map<String, Value>>) {
    let normalized = state.normalize(&raw_params(&pairs));
    let report = state.engine().apply_all(&normalized.criteria);
    let status = report.status();
    debug!(status = status.as_str(), rows = report.total_rows(), "data request served");

    let code = match status {
        OutcomeStatus::NotFound => StatusCode::NOT_FOUND,
        OutcomeStatus::Rows | OutcomeStatus::Empty => StatusCode::OK,
    };
    let headers = outcome_headers(status, &normalized.warnings);
    (code, headers, Json(project_report(&report)))
}

/// `GET /api/ranges`
pub async fn get_ranges(State(state): State<AppState>) -> Json<GlobalRanges> {
    Json(state.ranges())
}

pub(crate) fn outcome_headers(status: OutcomeStatus, warnings: &[String]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(status.as_str()));
    if !warnings.is_empty() {
        match HeaderValue::from_str(&warnings.join("; ")) {
            Ok(value) => {
                headers.insert(WARNINGS_HEADER, value);
            }
            Err(_) => warn!("warnings not representable as a header value"),
        }
    }
    headers
}
