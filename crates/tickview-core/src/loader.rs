//! Loading series from per-ticker CSV files.
//!
//! The expected header is the usual daily download schema:
//! `Date,Open,High,Low,Close,Adj Close,Volume`. `Adj Close` is optional.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::volume_from_f64;
use crate::{DailyBar, LoaderError, Series, Symbol, TradingDate, ValidationError};

/// Source of a single ticker's daily series.
pub trait SeriesLoader {
    fn load_series(&self, symbol: &Symbol) -> Result<Series, LoaderError>;
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    date: String,
    #[serde(alias = "Open", alias = "OPEN")]
    open: f64,
    #[serde(alias = "High", alias = "HIGH")]
    high: f64,
    #[serde(alias = "Low", alias = "LOW")]
    low: f64,
    #[serde(alias = "Close", alias = "CLOSE")]
    close: f64,
    #[serde(default, alias = "Adj Close", alias = "adj close", alias = "Adj_Close")]
    adj_close: Option<f64>,
    #[serde(alias = "Volume", alias = "VOLUME")]
    volume: f64,
}

impl CsvRow {
    fn into_bar(self) -> Result<DailyBar, ValidationError> {
        let date = TradingDate::parse(&self.date)?;
        let volume = volume_from_f64(self.volume)?;
        let bar = DailyBar::new(date, self.open, self.high, self.low, self.close, volume)?;
        match self.adj_close {
            Some(adj_close) => bar.with_adj_close(adj_close),
            None => Ok(bar),
        }
    }
}

/// Reads `<data_dir>/<SYMBOL>.csv` for each requested ticker.
#[derive(Debug, Clone)]
pub struct CsvDirectoryLoader {
    data_dir: PathBuf,
}

impl CsvDirectoryLoader {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!("{symbol}.csv"))
    }
}

impl SeriesLoader for CsvDirectoryLoader {
    fn load_series(&self, symbol: &Symbol) -> Result<Series, LoaderError> {
        let path = self.path_for(symbol);
        let read_error = |source| LoaderError::Read {
            symbol: symbol.to_string(),
            path: path.clone(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(read_error)?;

        let mut rows = Vec::new();
        let mut seen = HashSet::new();
        for (index, record) in reader.deserialize::<CsvRow>().enumerate() {
            // Header is line 1.
            let row = index + 2;
            let bar = record
                .map_err(read_error)?
                .into_bar()
                .map_err(|source| LoaderError::InvalidRow {
                    symbol: symbol.to_string(),
                    row,
                    source,
                })?;

            if !seen.insert(bar.date) {
                return Err(LoaderError::DuplicateDate {
                    symbol: symbol.to_string(),
                    date: bar.date.to_string(),
                });
            }
            rows.push(bar);
        }

        debug!(symbol = %symbol, path = %path.display(), rows = rows.len(), "csv parsed");
        Ok(Series::new(symbol.clone(), rows))
    }
}
