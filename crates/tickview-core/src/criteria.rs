//! Criteria normalization.
//!
//! Turns untyped request parameters into a [`CriteriaSet`]. Bad input never
//! fails a request: a parameter that does not parse is treated as unset and
//! reported as a warning.
//!
//! Numeric bounds follow a positive-only rule. A volume bound, price bound or
//! volume-increase threshold that is absent, `<= 0`, NaN or infinite is
//! *unset* and never applied, since zero or negative values are not
//! meaningful market readings and the filter form submits `0` for "any".

use serde::Serialize;
use tracing::{debug, warn};

use crate::{SeriesStore, Symbol, TradingDate};

/// Parameter names shared by the data API, dashboard and CLI.
pub mod param {
    pub const TICKER: &str = "ticker";
    pub const TICKERS: &str = "tickers";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const MIN_VOLUME: &str = "min_volume";
    pub const MAX_VOLUME: &str = "max_volume";
    pub const MIN_PRICE: &str = "min_price";
    pub const MAX_PRICE: &str = "max_price";
    pub const VOLUME_INCREASE_THRESHOLD: &str = "volume_increase_threshold";
}

/// Raw, untyped filter parameters as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawParams {
    pub tickers: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_volume: Option<String>,
    pub max_volume: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub volume_increase_threshold: Option<String>,
}

impl RawParams {
    /// Collect parameters from query pairs. `ticker`/`tickers` may repeat and
    /// each value may hold a comma-separated list; unrelated keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let value = value.into();
            let slot = match key.as_ref() {
                param::TICKER | param::TICKERS => {
                    raw.tickers.extend(split_tickers(&value));
                    continue;
                }
                param::START_DATE => &mut raw.start_date,
                param::END_DATE => &mut raw.end_date,
                param::MIN_VOLUME => &mut raw.min_volume,
                param::MAX_VOLUME => &mut raw.max_volume,
                param::MIN_PRICE => &mut raw.min_price,
                param::MAX_PRICE => &mut raw.max_price,
                param::VOLUME_INCREASE_THRESHOLD => &mut raw.volume_increase_threshold,
                _ => continue,
            };
            *slot = Some(value);
        }
        raw
    }
}

fn split_tickers(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|ticker| !ticker.is_empty())
        .map(str::to_owned)
}

/// Keep only positive, finite bounds.
pub fn positive_bound(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value > 0.0)
}

/// Inclusive date window; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Option<TradingDate>,
    pub end: Option<TradingDate>,
}

impl DateRange {
    pub const fn new(start: Option<TradingDate>, end: Option<TradingDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: TradingDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Inclusive numeric window with positive-only bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ValueRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl ValueRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: positive_bound(min),
            max: positive_bound(max),
        }
    }

    pub const fn min(&self) -> Option<f64> {
        self.min
    }

    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Normalized filter criteria for one request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaSet {
    tickers: Vec<Symbol>,
    unknown_tickers: Vec<String>,
    date_range: DateRange,
    volume_range: ValueRange,
    price_range: ValueRange,
    volume_increase_threshold_pct: Option<f64>,
}

/// A criteria set together with the warnings raised while normalizing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub criteria: CriteriaSet,
    pub warnings: Vec<String>,
}

impl CriteriaSet {
    /// Start a typed criteria set selecting `tickers`.
    pub fn builder(tickers: impl IntoIterator<Item = Symbol>) -> CriteriaSetBuilder {
        CriteriaSetBuilder::new(tickers)
    }

    /// Normalize raw parameters against the symbols known to `store`.
    ///
    /// - no ticker (or only blank ones) selects every known symbol;
    /// - tickers the store does not hold are moved to `unknown_tickers`;
    /// - malformed dates or numbers become unset and produce a warning.
    pub fn normalize(raw: &RawParams, store: &SeriesStore) -> Normalized {
        let mut warnings = Vec::new();
        let (tickers, unknown_tickers) = resolve_tickers(&raw.tickers, store);

        let date_range = DateRange::new(
            parse_date(param::START_DATE, raw.start_date.as_deref(), &mut warnings),
            parse_date(param::END_DATE, raw.end_date.as_deref(), &mut warnings),
        );
        let volume_range = ValueRange::new(
            parse_number(param::MIN_VOLUME, raw.min_volume.as_deref(), &mut warnings),
            parse_number(param::MAX_VOLUME, raw.max_volume.as_deref(), &mut warnings),
        );
        let price_range = ValueRange::new(
            parse_number(param::MIN_PRICE, raw.min_price.as_deref(), &mut warnings),
            parse_number(param::MAX_PRICE, raw.max_price.as_deref(), &mut warnings),
        );
        let volume_increase_threshold_pct = positive_bound(parse_number(
            param::VOLUME_INCREASE_THRESHOLD,
            raw.volume_increase_threshold.as_deref(),
            &mut warnings,
        ));

        for warning in &warnings {
            warn!(%warning, "filter parameter ignored");
        }

        Normalized {
            criteria: Self {
                tickers,
                unknown_tickers,
                date_range,
                volume_range,
                price_range,
                volume_increase_threshold_pct,
            },
            warnings,
        }
    }

    /// Render back to raw parameters. Normalizing the result against the
    /// same store yields an identical criteria set.
    pub fn to_params(&self) -> RawParams {
        RawParams {
            tickers: self
                .tickers
                .iter()
                .map(Symbol::to_string)
                .chain(self.unknown_tickers.iter().cloned())
                .collect(),
            start_date: self.date_range.start.map(|date| date.to_string()),
            end_date: self.date_range.end.map(|date| date.to_string()),
            min_volume: self.volume_range.min.map(|value| value.to_string()),
            max_volume: self.volume_range.max.map(|value| value.to_string()),
            min_price: self.price_range.min.map(|value| value.to_string()),
            max_price: self.price_range.max.map(|value| value.to_string()),
            volume_increase_threshold: self
                .volume_increase_threshold_pct
                .map(|value| value.to_string()),
        }
    }

    /// Selected tickers known to the store, in request order.
    pub fn tickers(&self) -> &[Symbol] {
        &self.tickers
    }

    /// Requested tickers the store does not hold, in request order.
    pub fn unknown_tickers(&self) -> &[String] {
        &self.unknown_tickers
    }

    pub fn selects(&self, symbol: &Symbol) -> bool {
        self.tickers.contains(symbol)
    }

    pub const fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub const fn volume_range(&self) -> ValueRange {
        self.volume_range
    }

    pub const fn price_range(&self) -> ValueRange {
        self.price_range
    }

    pub const fn volume_increase_threshold_pct(&self) -> Option<f64> {
        self.volume_increase_threshold_pct
    }

    /// True when no date, volume, price or threshold filter is active.
    pub fn is_unfiltered(&self) -> bool {
        self.date_range.is_unbounded()
            && self.volume_range.is_unbounded()
            && self.price_range.is_unbounded()
            && self.volume_increase_threshold_pct.is_none()
    }
}

/// Typed construction path; applies the same positive-only bound policy as
/// [`CriteriaSet::normalize`].
#[derive(Debug, Clone)]
pub struct CriteriaSetBuilder {
    criteria: CriteriaSet,
}

impl CriteriaSetBuilder {
    fn new(tickers: impl IntoIterator<Item = Symbol>) -> Self {
        let mut selected: Vec<Symbol> = Vec::new();
        for symbol in tickers {
            if !selected.contains(&symbol) {
                selected.push(symbol);
            }
        }

        Self {
            criteria: CriteriaSet {
                tickers: selected,
                unknown_tickers: Vec::new(),
                date_range: DateRange::default(),
                volume_range: ValueRange::default(),
                price_range: ValueRange::default(),
                volume_increase_threshold_pct: None,
            },
        }
    }

    pub fn date_range(mut self, start: Option<TradingDate>, end: Option<TradingDate>) -> Self {
        self.criteria.date_range = DateRange::new(start, end);
        self
    }

    pub fn volume_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.criteria.volume_range = ValueRange::new(min, max);
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.criteria.price_range = ValueRange::new(min, max);
        self
    }

    pub fn volume_increase_threshold(mut self, pct: Option<f64>) -> Self {
        self.criteria.volume_increase_threshold_pct = positive_bound(pct);
        self
    }

    pub fn build(self) -> CriteriaSet {
        self.criteria
    }
}

/// Split requested tickers into known symbols and the rest. A ticker that is
/// not even a valid symbol is just another unknown ticker.
fn resolve_tickers(requested: &[String], store: &SeriesStore) -> (Vec<Symbol>, Vec<String>) {
    let requested: Vec<&str> = requested
        .iter()
        .map(|ticker| ticker.trim())
        .filter(|ticker| !ticker.is_empty())
        .collect();

    if requested.is_empty() {
        return (store.symbols().to_vec(), Vec::new());
    }

    let mut known = Vec::new();
    let mut unknown: Vec<String> = Vec::new();
    for ticker in requested {
        match Symbol::parse(ticker) {
            Ok(symbol) if store.contains(&symbol) => {
                if !known.contains(&symbol) {
                    known.push(symbol);
                }
            }
            Ok(symbol) => {
                let symbol = String::from(symbol);
                if !unknown.contains(&symbol) {
                    unknown.push(symbol);
                }
            }
            Err(error) => {
                debug!(ticker, %error, "ticker is not a valid symbol");
                let ticker = ticker.to_ascii_uppercase();
                if !unknown.contains(&ticker) {
                    unknown.push(ticker);
                }
            }
        }
    }
    (known, unknown)
}

fn parse_date(name: &str, value: Option<&str>, warnings: &mut Vec<String>) -> Option<TradingDate> {
    let value = non_blank(value)?;
    match TradingDate::parse(value) {
        Ok(date) => Some(date),
        Err(_) => {
            warnings.push(format!("ignoring {name}='{value}': not an ISO date"));
            None
        }
    }
}

fn parse_number(name: &str, value: Option<&str>, warnings: &mut Vec<String>) -> Option<f64> {
    let value = non_blank(value)?;
    match value.parse::<f64>() {
        Ok(number) => Some(number),
        Err(_) => {
            warnings.push(format!("ignoring {name}='{value}': not a number"));
            None
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
