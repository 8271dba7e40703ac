use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickview_core::ValidationError),

    #[error("no data for requested tickers: {}", tickers.join(","))]
    NotFound { tickers: Vec<String> },

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error(transparent)]
    Core(#[from] tickview_core::CoreError),

    #[error(transparent)]
    Server(#[from] tickview_web::AppError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::NotFound { .. } => 3,
            Self::StrictModeViolation { .. } => 5,
            Self::Core(_) | Self::Server(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
