//! HTTP surface for the tickview filter engine.
//!
//! # Modules
//!
//! - [`app`]: router and middleware
//! - [`config`]: listen address and data location
//! - [`state`]: shared read-only store handle
//! - [`error`]: error to HTTP status mapping
//! - [`routes`]: handlers
//! - [`view`]: chart-ready view models

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod view;

use std::sync::Arc;

use tickview_core::{CsvDirectoryLoader, SeriesStore};
use tokio::net::TcpListener;
use tracing::info;

pub use app::create_app;
pub use config::ServerConfig;
pub use error::{AppError, AppResult};
pub use state::AppState;
pub use view::{ChartKind, DashboardView};

/// Load every configured ticker. Fails on the first series that cannot be
/// read.
pub fn load_store(config: &ServerConfig) -> Result<SeriesStore, tickview_core::CoreError> {
    let loader = CsvDirectoryLoader::new(&config.data_dir);
    SeriesStore::from_loader(&loader, &config.tickers)
}

/// Bind `config.bind_addr()` and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, store: SeriesStore) -> AppResult<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), tickers = store.len(), "tickview listening");

    let app = create_app(AppState::new(Arc::new(store)));
    axum::serve(listener, app).await?;
    Ok(())
}
