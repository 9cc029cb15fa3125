//! Error types for the simulation core
//!
//! Generating readings, classifying and synthesizing alerts cannot fail;
//! errors only arise from configuration and export.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Plot not found: {0}")]
    UnknownPlot(String),

    #[error("History window of {0} days exceeds the maximum of {1}")]
    InvalidHistoryWindow(u32, u32),

    #[error("CSV export error: {0}")]
    Export(String),
}

impl From<csv::Error> for SimulationError {
    fn from(err: csv::Error) -> Self {
        SimulationError::Export(err.to_string())
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;
