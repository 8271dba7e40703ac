use tickview_web::{load_store, ServerConfig};
use tracing::info;

use crate::cli::ServeArgs;
use crate::error::CliError;

/// Load the store, then serve. A loader failure aborts before binding.
pub async fn run(mut config: ServerConfig, args: &ServeArgs) -> Result<(), CliError> {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!(
        data_dir = %config.data_dir.display(),
        tickers = config.tickers.len(),
        "loading series"
    );
    let store = load_store(&config)?;
    tickview_web::serve(&config, store).await?;
    Ok(())
}
