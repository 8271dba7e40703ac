//! Store-wide value ranges used to seed filter defaults.
//!
//! These ranges are informational. They are never merged into a
//! [`CriteriaSet`](crate::CriteriaSet).

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::{RawParams, SeriesStore, TradingDate};

/// Upper volume bound shown when the store has no positive volume.
pub const FALLBACK_MAX_VOLUME: f64 = 10_000_000.0;
/// Upper price bound shown when the store has no positive close.
pub const FALLBACK_MAX_PRICE: f64 = 1_000.0;

/// Min/max of date, volume and close price across every row of every series.
///
/// An empty store yields zeros and blank dates; check [`GlobalRanges::is_empty`]
/// before reading them as data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GlobalRanges {
    #[serde(serialize_with = "date_or_blank")]
    pub min_date: Option<TradingDate>,
    #[serde(serialize_with = "date_or_blank")]
    pub max_date: Option<TradingDate>,
    pub min_volume: u64,
    pub max_volume: u64,
    pub min_price: f64,
    pub max_price: f64,
}

impl GlobalRanges {
    /// Scan every row once.
    pub fn compute(store: &SeriesStore) -> Self {
        let mut rows = store.iter().flat_map(|series| series.rows.iter());
        let Some(first) = rows.next() else {
            return Self::default();
        };

        let mut ranges = Self {
            min_date: Some(first.date),
            max_date: Some(first.date),
            min_volume: first.volume,
            max_volume: first.volume,
            min_price: first.close,
            max_price: first.close,
        };
        let mut scanned = 1_usize;
        for bar in rows {
            ranges.min_date = ranges.min_date.min(Some(bar.date));
            ranges.max_date = ranges.max_date.max(Some(bar.date));
            ranges.min_volume = ranges.min_volume.min(bar.volume);
            ranges.max_volume = ranges.max_volume.max(bar.volume);
            ranges.min_price = ranges.min_price.min(bar.close);
            ranges.max_price = ranges.max_price.max(bar.close);
            scanned += 1;
        }

        debug!(rows = scanned, series = store.len(), "global ranges computed");
        ranges
    }

    /// True when no row was scanned.
    pub const fn is_empty(&self) -> bool {
        self.min_date.is_none()
    }
}

fn date_or_blank<S>(value: &Option<TradingDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.collect_str(date),
        None => serializer.serialize_str(""),
    }
}

/// Values pre-filled into a filter form.
///
/// Explicit request values are echoed back; anything missing falls back to
/// the global ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterDefaults {
    pub start_date: String,
    pub end_date: String,
    pub min_volume: f64,
    pub max_volume: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub volume_increase_threshold: Option<f64>,
}

impl FilterDefaults {
    pub fn resolve(ranges: &GlobalRanges, raw: &RawParams) -> Self {
        let min_date = ranges.min_date.map(|date| date.to_string()).unwrap_or_default();
        let max_date = ranges.max_date.map(|date| date.to_string()).unwrap_or_default();

        Self {
            start_date: explicit(raw.start_date.as_deref())
                .map(str::to_owned)
                .unwrap_or(min_date),
            end_date: explicit(raw.end_date.as_deref())
                .map(str::to_owned)
                .unwrap_or(max_date),
            min_volume: explicit_number(raw.min_volume.as_deref())
                .unwrap_or_else(|| positive_or(ranges.min_volume as f64, 0.0)),
            max_volume: explicit_number(raw.max_volume.as_deref())
                .unwrap_or_else(|| positive_or(ranges.max_volume as f64, FALLBACK_MAX_VOLUME)),
            min_price: explicit_number(raw.min_price.as_deref())
                .unwrap_or_else(|| positive_or(ranges.min_price, 0.0)),
            max_price: explicit_number(raw.max_price.as_deref())
                .unwrap_or_else(|| positive_or(ranges.max_price, FALLBACK_MAX_PRICE)),
            volume_increase_threshold: explicit_number(raw.volume_increase_threshold.as_deref()),
        }
    }
}

fn explicit(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn explicit_number(value: Option<&str>) -> Option<f64> {
    explicit(value).and_then(|value| value.parse().ok())
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        fallback
    }
}
