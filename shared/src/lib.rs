//! Shared simulation core for the AeroSense field monitoring dashboard
//!
//! This crate contains the models and the simulation engine shared between
//! the headless daemon (backend) and the browser dashboard (via WASM).

pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod history;
pub mod models;
pub mod simulator;
pub mod synthesizer;
pub mod thresholds;
pub mod types;
pub mod validation;

pub use config::SimulationConfig;
pub use error::{SimulationError, SimulationResult};
pub use models::*;
pub use simulator::Simulator;
pub use thresholds::{classify_reading, ThresholdTable, STANDARD_THRESHOLDS};
pub use types::*;
