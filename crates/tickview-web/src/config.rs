//! Server configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TICKVIEW_HOST` | `0.0.0.0` |
//! | `TICKVIEW_PORT` | `5000` |
//! | `TICKVIEW_DATA_DIR` | `finance_dashboard_data` |
//! | `TICKVIEW_TICKERS` | `SPY,AAPL,NVDA,TSLA,MSFT` |

use std::path::PathBuf;

use tickview_core::{Symbol, ValidationError};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "finance_dashboard_data";
pub const DEFAULT_TICKERS: [&str; 5] = ["SPY", "AAPL", "NVDA", "TSLA", "MSFT"];

/// Where to listen and which series to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub tickers: Vec<Symbol>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tickers: DEFAULT_TICKERS
                .iter()
                .filter_map(|ticker| Symbol::parse(ticker).ok())
                .collect(),
        }
    }
}

impl ServerConfig {
    /// Read overrides from the environment. An unparsable port falls back to
    /// the default; a malformed ticker list is an error.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("TICKVIEW_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("TICKVIEW_PORT").and_then(|port| port.parse().ok()) {
            config.port = port;
        }
        if let Some(data_dir) = lookup("TICKVIEW_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(tickers) = lookup("TICKVIEW_TICKERS") {
            config.tickers = parse_ticker_list(&tickers)?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated ticker list, skipping blanks and duplicates.
pub fn parse_ticker_list(value: &str) -> Result<Vec<Symbol>, ValidationError> {
    let mut tickers: Vec<Symbol> = Vec::new();
    for ticker in value.split(',').filter(|ticker| !ticker.trim().is_empty()) {
        let symbol = Symbol::parse(ticker)?;
        if !tickers.contains(&symbol) {
            tickers.push(symbol);
        }
    }
    Ok(tickers)
}
