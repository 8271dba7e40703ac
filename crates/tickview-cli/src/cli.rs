//! CLI argument definitions.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` | Load the store and serve the HTTP API |
//! | `filter` | Filter series and print the per-ticker rows |
//! | `ranges` | Print store-wide date, volume and price ranges |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--data-dir` | `$TICKVIEW_DATA_DIR` or `finance_dashboard_data` | Directory holding `<TICKER>.csv` files |
//! | `--tickers` | `$TICKVIEW_TICKERS` or `SPY,AAPL,NVDA,TSLA,MSFT` | Tickers to load |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//!
//! # Examples
//!
//! ```bash
//! tickview serve --port 8080
//! tickview filter --ticker AAPL --volume-increase-threshold 40 --pretty
//! tickview ranges --format table
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Filter and chart daily OHLCV series for a fixed set of tickers.
#[derive(Debug, Parser)]
#[command(name = "tickview", author, version, about)]
pub struct Cli {
    /// Directory holding one `<TICKER>.csv` file per ticker.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Comma-separated tickers to load.
    #[arg(long, global = true)]
    pub tickers: Option<String>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text tables for terminal display.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load every configured ticker and serve the HTTP API.
    ///
    ///   tickview serve
    ///   tickview serve --host 127.0.0.1 --port 8080
    Serve(ServeArgs),

    /// Filter the loaded series.
    ///
    /// Bounds that are zero, negative or unparsable are ignored.
    ///
    ///   tickview filter --ticker AAPL --ticker MSFT --min-price 150
    ///   tickview filter --start-date 2024-01-01 --volume-increase-threshold 40
    Filter(FilterArgs),

    /// Print min/max date, volume and close price across all series.
    Ranges,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides `TICKVIEW_HOST`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `TICKVIEW_PORT`).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Raw filter values. Kept as strings so they go through the same
/// normalization as HTTP query parameters.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Ticker to include; repeat or comma-separate for several. Defaults to
    /// every loaded ticker.
    #[arg(long = "ticker")]
    pub tickers: Vec<String>,

    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub min_volume: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub max_volume: Option<String>,

    /// Lower bound on the close price.
    #[arg(long, allow_hyphen_values = true)]
    pub min_price: Option<String>,

    /// Upper bound on the close price.
    #[arg(long, allow_hyphen_values = true)]
    pub max_price: Option<String>,

    /// Keep only days whose volume rose by at least this percentage over
    /// the previous remaining day.
    #[arg(long, allow_hyphen_values = true)]
    pub volume_increase_threshold: Option<String>,
}
