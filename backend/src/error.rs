//! Error handling for the AeroSense simulation daemon

use shared::SimulationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid simulation settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

impl From<SimulationError> for AppError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::InvalidConfig(errors) => AppError::InvalidSettings(errors),
            SimulationError::UnknownPlot(id) => AppError::NotFound(format!("Plot {}", id)),
            SimulationError::Export(msg) => AppError::Export(msg),
            err @ SimulationError::InvalidHistoryWindow(..) => {
                AppError::InvalidRequest(err.to_string())
            }
        }
    }
}

impl AppError {
    /// Stable machine-readable code for log fields
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::InvalidSettings(_) => "VALIDATION_ERROR",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
