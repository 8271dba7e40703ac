//! Route handlers.
//!
//! - [`health`]: liveness probe
//! - [`data`]: filtered rows and global ranges
//! - [`dashboard`]: chart-ready dashboard view

pub mod dashboard;
pub mod data;
pub mod health;

use tickview_core::RawParams;

/// Query pairs as received. A `Vec` keeps repeated `ticker` keys.
pub type QueryPairs = Vec<(String, String)>;

pub(crate) fn raw_params(pairs: &[(String, String)]) -> RawParams {
    RawParams::from_pairs(pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
}
