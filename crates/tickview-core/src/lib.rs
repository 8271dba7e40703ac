//! # Tickview Core
//!
//! Filtering engine for daily OHLCV equity series.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Symbol, trading date and daily bar types |
//! | [`store`] | Read-only per-ticker series store |
//! | [`loader`] | CSV loading of configured tickers |
//! | [`criteria`] | Raw parameter normalization into a criteria set |
//! | [`filter`] | The filter engine and its outcomes |
//! | [`ranges`] | Store-wide ranges and filter-form defaults |
//! | [`projection`] | Record-per-row JSON projection |
//! | [`envelope`] | Response envelope for machine-readable output |
//! | [`error`] | Core error types |
//!
//! ## Data flow
//!
//! ```text
//! loader ──▶ SeriesStore ──▶ FilterEngine ──▶ FilterReport ──▶ projection / views
//!                 │               ▲
//!                 │          CriteriaSet ◀── RawParams
//!                 ▼
//!           GlobalRanges (defaults only)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickview_core::{CriteriaSet, CsvDirectoryLoader, FilterEngine, RawParams, SeriesStore, Symbol};
//!
//! let symbols = vec![Symbol::parse("AAPL")?];
//! let store = SeriesStore::from_loader(&CsvDirectoryLoader::new("data"), &symbols)?;
//! let engine = FilterEngine::new(Arc::new(store));
//!
//! let raw = RawParams::from_pairs([("ticker", "AAPL"), ("volume_increase_threshold", "40")]);
//! let normalized = CriteriaSet::normalize(&raw, engine.store());
//! let report = engine.apply_all(&normalized.criteria);
//! println!("{} rows", report.total_rows());
//! ```
//!
//! Everything here is synchronous and in-memory. The store is never mutated
//! after construction, so concurrent requests need no locking.

pub mod criteria;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod loader;
pub mod projection;
pub mod ranges;
pub mod store;

pub use criteria::{CriteriaSet, CriteriaSetBuilder, DateRange, Normalized, RawParams, ValueRange};
pub use domain::{DailyBar, Symbol, TradingDate};
pub use envelope::{Envelope, EnvelopeMeta};
pub use error::{CoreError, LoaderError, StoreError, ValidationError};
pub use filter::{
    filter_series, volume_changes, FilterEngine, FilterOutcome, FilterReport, FilteredRow,
    FilteredSeries, OutcomeStatus,
};
pub use loader::{CsvDirectoryLoader, SeriesLoader};
pub use projection::{project_report, project_rows};
pub use ranges::{FilterDefaults, GlobalRanges};
pub use store::{Series, SeriesStore};
