//! JSON projection of filter results.
//!
//! Each row becomes a record keyed by the familiar download column names.
//! `Volume_Change_Pct` only appears when the threshold stage ran.

use serde_json::{Map, Value};

use crate::{FilterReport, FilteredRow, FilteredSeries};

pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const ADJ_CLOSE: &str = "Adj Close";
pub const VOLUME: &str = "Volume";
pub const VOLUME_CHANGE_PCT: &str = "Volume_Change_Pct";

/// One record per row, in date order.
pub fn project_rows(series: &FilteredSeries) -> Vec<Map<String, Value>> {
    series
        .rows
        .iter()
        .map(|row| project_row(row, series.volume_change_computed))
        .collect()
}

fn project_row(row: &FilteredRow, with_change: bool) -> Map<String, Value> {
    let bar = &row.bar;
    let mut record = Map::new();
    record.insert(DATE.to_owned(), Value::from(bar.date.to_string()));
    record.insert(OPEN.to_owned(), Value::from(bar.open));
    record.insert(HIGH.to_owned(), Value::from(bar.high));
    record.insert(LOW.to_owned(), Value::from(bar.low));
    record.insert(CLOSE.to_owned(), Value::from(bar.close));
    if let Some(adj_close) = bar.adj_close {
        record.insert(ADJ_CLOSE.to_owned(), Value::from(adj_close));
    }
    record.insert(VOLUME.to_owned(), Value::from(bar.volume));
    if with_change {
        record.insert(
            VOLUME_CHANGE_PCT.to_owned(),
            row.volume_change_pct.map_or(Value::Null, Value::from),
        );
    }
    record
}

/// Map of ticker to records. Tickers without rows are left out, so a request
/// where nothing matched (or nothing was known) serializes to `{}`.
pub fn project_report(report: &FilterReport) -> Map<String, Value> {
    report
        .series()
        .map(|series| {
            let rows = project_rows(series).into_iter().map(Value::Object).collect();
            (series.symbol.to_string(), Value::Array(rows))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{CriteriaSet, DailyBar, FilterEngine, Series, SeriesStore, Symbol, TradingDate};

    fn engine() -> FilterEngine {
        let rows = [("2024-01-02", 100), ("2024-01-03", 150), ("2024-01-04", 90)]
            .iter()
            .map(|(date, volume)| {
                let date = TradingDate::parse(date).expect("date");
                DailyBar::new(date, 10.0, 12.0, 9.5, 11.0, *volume)
                    .and_then(|bar| bar.with_adj_close(10.9))
                    .expect("bar")
            })
            .collect();
        let series = Series::new(Symbol::parse("AAPL").expect("symbol"), rows);
        FilterEngine::new(Arc::new(SeriesStore::new([series]).expect("store")))
    }

    fn aapl() -> Symbol {
        Symbol::parse("AAPL").expect("symbol")
    }

    #[test]
    fn projects_rows_by_column_name() {
        let criteria = CriteriaSet::builder([aapl()])
            .volume_increase_threshold(Some(40.0))
            .build();
        let report = engine().apply_all(&criteria);

        assert_eq!(
            Value::Object(project_report(&report)),
            json!({
                "AAPL": [{
                    "Date": "2024-01-03",
                    "Open": 10.0,
                    "High": 12.0,
                    "Low": 9.5,
                    "Close": 11.0,
                    "Adj Close": 10.9,
                    "Volume": 150,
                    "Volume_Change_Pct": 50.0,
                }]
            })
        );
    }

    #[test]
    fn omits_change_column_when_not_requested() {
        let report = engine().apply_all(&CriteriaSet::builder([aapl()]).build());
        let projected = project_report(&report);

        let rows = projected["AAPL"].as_array().expect("rows");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.get(VOLUME_CHANGE_PCT).is_none()));
    }

    #[test]
    fn empty_and_unknown_both_serialize_to_an_empty_map() {
        let empty = CriteriaSet::builder([aapl()])
            .price_range(Some(500.0), None)
            .build();
        let unknown = CriteriaSet::builder([Symbol::parse("FOO").expect("symbol")]).build();

        assert!(project_report(&engine().apply_all(&empty)).is_empty());
        assert!(project_report(&engine().apply_all(&unknown)).is_empty());
    }
}
