//! Time-series filter engine.
//!
//! Stages run in a fixed order, each on the rows left by the previous one:
//!
//! 1. ticker selection (unselected or unknown tickers are `NotFound`)
//! 2. date window
//! 3. volume window
//! 4. close-price window
//! 5. volume-increase threshold
//!
//! The threshold stage compares each row with the row before it *among the
//! survivors of stages 2-4*, in date order. Removing a day earlier therefore
//! changes what counts as the previous day for its successor.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{CriteriaSet, DailyBar, Series, SeriesStore, Symbol};

/// A bar that passed every active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRow {
    #[serde(flatten)]
    pub bar: DailyBar,
    /// Percent change of volume against the preceding surviving row. Only
    /// populated when the threshold stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_change_pct: Option<f64>,
}

/// Non-empty, date-ascending filter result for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredSeries {
    pub symbol: Symbol,
    pub rows: Vec<FilteredRow>,
    /// Whether `volume_change_pct` was computed for these rows.
    pub volume_change_computed: bool,
}

/// Coarse classification shared by single outcomes and whole reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Rows,
    Empty,
    NotFound,
}

impl OutcomeStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Empty => "empty",
            Self::NotFound => "not_found",
        }
    }
}

/// Result of filtering one ticker.
///
/// `Empty` (known ticker, nothing matched) and `NotFound` (ticker not
/// selected or not loaded) are deliberately distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Rows(FilteredSeries),
    Empty(Symbol),
    NotFound(String),
}

impl FilterOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            Self::Rows(series) => series.symbol.as_str(),
            Self::Empty(symbol) => symbol.as_str(),
            Self::NotFound(ticker) => ticker,
        }
    }

    pub fn rows(&self) -> &[FilteredRow] {
        match self {
            Self::Rows(series) => &series.rows,
            Self::Empty(_) | Self::NotFound(_) => &[],
        }
    }

    pub const fn status(&self) -> OutcomeStatus {
        match self {
            Self::Rows(_) => OutcomeStatus::Rows,
            Self::Empty(_) => OutcomeStatus::Empty,
            Self::NotFound(_) => OutcomeStatus::NotFound,
        }
    }

    pub fn as_series(&self) -> Option<&FilteredSeries> {
        match self {
            Self::Rows(series) => Some(series),
            Self::Empty(_) | Self::NotFound(_) => None,
        }
    }
}

/// Percent change of each row's volume versus the row before it.
///
/// The first row has no predecessor, and a zero previous volume has no
/// defined change; both yield `None`.
pub fn volume_changes(rows: &[DailyBar]) -> Vec<Option<f64>> {
    let mut previous: Option<u64> = None;
    rows.iter()
        .map(|bar| {
            let change = previous.and_then(|previous| pct_change(previous, bar.volume));
            previous = Some(bar.volume);
            change
        })
        .collect()
}

fn pct_change(previous: u64, current: u64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    let previous = previous as f64;
    Some((current as f64 - previous) / previous * 100.0)
}

/// Apply `criteria` to a copy of `series`. The stored rows are never
/// mutated.
pub fn filter_series(series: &Series, criteria: &CriteriaSet) -> FilterOutcome {
    if !criteria.selects(&series.symbol) {
        return FilterOutcome::NotFound(series.symbol.to_string());
    }

    let date_range = criteria.date_range();
    let mut rows: Vec<DailyBar> = series
        .rows
        .iter()
        .filter(|bar| date_range.contains(bar.date))
        .cloned()
        .collect();
    debug!(symbol = %series.symbol, stage = "date", rows = rows.len());

    let volume_range = criteria.volume_range();
    rows.retain(|bar| volume_range.contains(bar.volume as f64));
    debug!(symbol = %series.symbol, stage = "volume", rows = rows.len());

    let price_range = criteria.price_range();
    rows.retain(|bar| price_range.contains(bar.close));
    debug!(symbol = %series.symbol, stage = "price", rows = rows.len());

    // Stored rows keep file order; the change computation and every caller
    // need ascending dates.
    rows.sort_by_key(|bar| bar.date);

    let threshold = criteria.volume_increase_threshold_pct();
    let rows: Vec<FilteredRow> = match threshold {
        Some(threshold) => {
            let changes = volume_changes(&rows);
            rows.into_iter()
                .zip(changes)
                .filter_map(|(bar, change)| {
                    change
                        .filter(|change| *change >= threshold)
                        .map(|change| FilteredRow {
                            bar,
                            volume_change_pct: Some(change),
                        })
                })
                .collect()
        }
        None => rows
            .into_iter()
            .map(|bar| FilteredRow {
                bar,
                volume_change_pct: None,
            })
            .collect(),
    };
    if let Some(threshold) = threshold {
        debug!(symbol = %series.symbol, stage = "volume_increase", threshold, rows = rows.len());
    }

    if rows.is_empty() {
        info!(symbol = %series.symbol, "no rows matched filters");
        return FilterOutcome::Empty(series.symbol.clone());
    }

    info!(symbol = %series.symbol, rows = rows.len(), "series filtered");
    FilterOutcome::Rows(FilteredSeries {
        symbol: series.symbol.clone(),
        rows,
        volume_change_computed: threshold.is_some(),
    })
}

/// Per-ticker outcomes for one request, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    outcomes: Vec<FilterOutcome>,
}

impl FilterReport {
    pub fn new(outcomes: Vec<FilterOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[FilterOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<FilterOutcome> {
        self.outcomes
    }

    /// `Rows` if any ticker produced rows, `NotFound` if every requested
    /// ticker was unknown, `Empty` otherwise.
    pub fn status(&self) -> OutcomeStatus {
        if self
            .outcomes
            .iter()
            .any(|outcome| outcome.status() == OutcomeStatus::Rows)
        {
            OutcomeStatus::Rows
        } else if !self.outcomes.is_empty()
            && self
                .outcomes
                .iter()
                .all(|outcome| outcome.status() == OutcomeStatus::NotFound)
        {
            OutcomeStatus::NotFound
        } else {
            OutcomeStatus::Empty
        }
    }

    pub fn total_rows(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.rows().len()).sum()
    }

    pub fn series(&self) -> impl Iterator<Item = &FilteredSeries> + '_ {
        self.outcomes.iter().filter_map(FilterOutcome::as_series)
    }
}

/// Filter engine bound to a shared, read-only store.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    store: Arc<SeriesStore>,
}

impl FilterEngine {
    pub fn new(store: Arc<SeriesStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    /// Filter one ticker. A ticker the store does not hold is `NotFound`.
    pub fn apply(&self, symbol: &Symbol, criteria: &CriteriaSet) -> FilterOutcome {
        match self.store.get(symbol) {
            Some(series) => filter_series(series, criteria),
            None => {
                info!(symbol = %symbol, "ticker not found in store");
                FilterOutcome::NotFound(symbol.to_string())
            }
        }
    }

    /// Filter every selected ticker, then report each unknown ticker as
    /// `NotFound`.
    pub fn apply_all(&self, criteria: &CriteriaSet) -> FilterReport {
        let outcomes = criteria
            .tickers()
            .iter()
            .map(|symbol| self.apply(symbol, criteria))
            .chain(criteria.unknown_tickers().iter().map(|ticker| {
                info!(ticker = %ticker, "ticker not found in store");
                FilterOutcome::NotFound(ticker.clone())
            }))
            .collect();
        FilterReport::new(outcomes)
    }
}
