//! `GET /api/dashboard?ticker=..&chart=line|candlestick&...`
//!
//! Same filter parameters as `/api/data`, plus `chart`. The response is a
//! [`DashboardView`] with chart series, global ranges and the values to
//! pre-fill the filter form.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tickview_core::{FilterDefaults, OutcomeStatus};

use crate::routes::data::outcome_headers;
use crate::routes::{raw_params, QueryPairs};
use crate::state::AppState;
use crate::view::{dashboard_view, ChartKind, DashboardContext, DashboardView};

pub const CHART_PARAM: &str = "chart";

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> (StatusCode, HeaderMap, Json<DashboardView>) {
    let raw = raw_params(&pairs);
    let normalized = state.normalize(&raw);
    let mut warnings = normalized.warnings;

    let chart = match chart_param(&pairs).map(str::parse::<ChartKind>) {
        Some(Ok(kind)) => kind,
        Some(Err(message)) => {
            warnings.push(format!("{CHART_PARAM}: {message}"));
            ChartKind::default()
        }
        None => ChartKind::default(),
    };

    let report = state.engine().apply_all(&normalized.criteria);
    let ranges = state.ranges();
    let headers = outcome_headers(report.status(), &warnings);
    let view = dashboard_view(
        &report,
        DashboardContext {
            known: state.store().symbols(),
            selected: normalized.criteria.tickers(),
            chart,
            ranges,
            current_filters: FilterDefaults::resolve(&ranges, &raw),
            warnings,
        },
    );

    let code = match view.status {
        OutcomeStatus::NotFound => StatusCode::NOT_FOUND,
        OutcomeStatus::Rows | OutcomeStatus::Empty => StatusCode::OK,
    };
    (code, headers, Json(view))
}

fn chart_param(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .rev()
        .find(|(key, value)| key == CHART_PARAM && !value.trim().is_empty())
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tickview_core::{DailyBar, Series, SeriesStore, Symbol, TradingDate};
    use tower::ServiceExt;

    use crate::app::create_app;

    use super::*;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let series = ["SPY", "TSLA"].map(|ticker| {
            let date = TradingDate::parse("2024-01-02").expect("date");
            let bar = DailyBar::new(date, 100.0, 101.0, 99.0, 100.5, 1_000).expect("bar");
            Series::new(Symbol::parse(ticker).expect("symbol"), vec![bar])
        });
        let app = create_app(AppState::new(Arc::new(
            SeriesStore::new(series).expect("store"),
        )));

        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).expect("json"))
    }

    #[tokio::test]
    async fn no_ticker_selects_every_series() {
        let (status, body) = get("/api/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"], serde_json::json!(["SPY", "TSLA"]));
        assert_eq!(body["charts"]["volume"]["type"], "grouped_bars");
        assert_eq!(body["current_filters"]["start_date"], "2024-01-02");
    }

    #[tokio::test]
    async fn single_ticker_candlestick() {
        let (_, body) = get("/api/dashboard?ticker=tsla&chart=candlestick").await;

        assert_eq!(body["chart"], "candlestick");
        assert_eq!(body["charts"]["price"][0]["type"], "candlestick");
        assert_eq!(body["charts"]["price"][0]["high"][0], 101.0);
    }

    #[tokio::test]
    async fn bad_chart_kind_falls_back_to_line() {
        let (status, body) = get("/api/dashboard?ticker=SPY&chart=pie").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chart"], "line");
        assert_eq!(body["warnings"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn unknown_ticker_has_no_charts() {
        let (status, body) = get("/api/dashboard?ticker=FOO").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["not_found"], serde_json::json!(["FOO"]));
        assert!(body["charts"].is_null());
    }
}
