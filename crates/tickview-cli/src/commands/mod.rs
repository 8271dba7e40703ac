mod filter;
mod ranges;
mod serve;

use std::sync::Arc;

use serde_json::Value;
use tickview_core::{Envelope, EnvelopeMeta, OutcomeStatus};
use tickview_web::config::parse_ticker_list;
use tickview_web::{load_store, ServerConfig};
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub status: OutcomeStatus,
    pub tickers: Vec<String>,
    pub warnings: Vec<String>,
    pub not_found: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            status: OutcomeStatus::Rows,
            tickers: Vec::new(),
            warnings: Vec::new(),
            not_found: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: OutcomeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = tickers;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_not_found(mut self, not_found: Vec<String>) -> Self {
        self.not_found = not_found;
        self
    }
}

/// A finished one-shot command: the envelope to print and the tickers that
/// turned out to be unknown.
pub struct CommandOutput {
    pub envelope: Envelope<Value>,
    pub not_found: Vec<String>,
}

/// Defaults, then `TICKVIEW_*` variables, then global flags.
pub fn resolve_config(cli: &Cli) -> Result<ServerConfig, CliError> {
    let mut config = ServerConfig::from_env()?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(tickers) = &cli.tickers {
        config.tickers = parse_ticker_list(tickers)?;
    }
    Ok(config)
}

/// Run the selected command. `serve` only returns once the server stops and
/// yields no output.
pub async fn run(cli: &Cli) -> Result<Option<CommandOutput>, CliError> {
    let config = resolve_config(cli)?;
    let command_result = match &cli.command {
        Command::Serve(args) => {
            serve::run(config, args).await?;
            return Ok(None);
        }
        Command::Filter(args) => filter::run(args, Arc::new(load_store(&config)?)),
        Command::Ranges => ranges::run(&load_store(&config)?)?,
    };

    let CommandResult {
        data,
        status,
        tickers,
        warnings,
        not_found,
    } = command_result;

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), status)?.with_tickers(tickers);
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Some(CommandOutput {
        envelope: Envelope::new(meta, data)?,
        not_found,
    }))
}
