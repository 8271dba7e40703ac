//! # Domain Models
//!
//! Typed building blocks for daily equity series.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`TradingDate`] | Calendar date of a daily bar |
//! | [`DailyBar`] | One OHLCV record |
//!
//! All constructors validate their invariants and return
//! [`ValidationError`](crate::ValidationError) on bad input.

mod bar;
mod date;
mod symbol;

pub use bar::{volume_from_f64, DailyBar};
pub use date::TradingDate;
pub use symbol::Symbol;
