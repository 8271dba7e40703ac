use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `tickview-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be ISO formatted (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("volume must be a whole number of shares: {value}")]
    FractionalVolume { value: f64 },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// Startup-time failures while loading a configured ticker.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read series for {symbol} from {}: {source}", path.display())]
    Read {
        symbol: String,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid row {row} for {symbol}: {source}")]
    InvalidRow {
        symbol: String,
        row: usize,
        #[source]
        source: ValidationError,
    },

    #[error("duplicate date {date} in series for {symbol}")]
    DuplicateDate { symbol: String, date: String },
}

/// Errors raised while assembling a series store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("symbol {symbol} was supplied more than once")]
    DuplicateSymbol { symbol: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
