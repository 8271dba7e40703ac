//! Immutable per-process store of daily series.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::loader::SeriesLoader;
use crate::{CoreError, DailyBar, StoreError, Symbol};

/// Daily rows of one ticker, kept in file order.
///
/// Rows are not guaranteed to be sorted by date; anything that depends on
/// temporal order must sort a copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub symbol: Symbol,
    pub rows: Vec<DailyBar>,
}

impl Series {
    pub fn new(symbol: Symbol, rows: Vec<DailyBar>) -> Self {
        Self { symbol, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read-only collection of series keyed by symbol.
///
/// Built once at startup and shared behind an `Arc`; no method mutates it.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: BTreeMap<Symbol, Series>,
    order: Vec<Symbol>,
}

impl SeriesStore {
    /// Assemble a store, keeping the order in which series were supplied.
    pub fn new(series: impl IntoIterator<Item = Series>) -> Result<Self, StoreError> {
        let mut store = Self::default();
        for item in series {
            if store.series.contains_key(&item.symbol) {
                return Err(StoreError::DuplicateSymbol {
                    symbol: item.symbol.to_string(),
                });
            }
            store.order.push(item.symbol.clone());
            store.series.insert(item.symbol.clone(), item);
        }
        Ok(store)
    }

    /// Load every configured ticker. The first loader failure aborts, so a
    /// process never starts with a partially populated store.
    pub fn from_loader<L>(loader: &L, symbols: &[Symbol]) -> Result<Self, CoreError>
    where
        L: SeriesLoader + ?Sized,
    {
        let mut loaded = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let series = loader.load_series(symbol)?;
            info!(symbol = %symbol, rows = series.len(), "series loaded");
            loaded.push(series);
        }
        Ok(Self::new(loaded)?)
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Series> {
        self.series.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.series.contains_key(symbol)
    }

    /// Symbols in configuration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Series in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> + '_ {
        self.order.iter().filter_map(|symbol| self.series.get(symbol))
    }
}
