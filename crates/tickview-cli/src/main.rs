mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tickview_core::OutcomeStatus;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let Some(output) = commands::run(&cli).await? else {
        return Ok(());
    };
    output::render(&output.envelope, cli.format, cli.pretty)?;

    if output.envelope.meta.status == OutcomeStatus::NotFound {
        return Err(CliError::NotFound {
            tickers: output.not_found,
        });
    }

    if cli.strict && !output.envelope.meta.warnings.is_empty() {
        return Err(CliError::StrictModeViolation {
            warning_count: output.envelope.meta.warnings.len(),
        });
    }

    Ok(())
}
