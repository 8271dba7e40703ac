use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// One daily OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adj_close: Option<f64>,
    pub volume: u64,
}

impl DailyBar {
    /// Validates that every price is finite and non-negative.
    ///
    /// High/low consistency is not checked.
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            adj_close: None,
            volume,
        })
    }

    pub fn with_adj_close(mut self, adj_close: f64) -> Result<Self, ValidationError> {
        validate_non_negative("adj_close", adj_close)?;
        self.adj_close = Some(adj_close);
        Ok(self)
    }
}

/// Convert a CSV volume cell (often written as `1234.0`) into whole shares.
pub fn volume_from_f64(value: f64) -> Result<u64, ValidationError> {
    validate_non_negative("volume", value)?;
    if value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(ValidationError::FractionalVolume { value });
    }
    Ok(value as u64)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
