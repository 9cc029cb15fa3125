//! AeroSense simulation daemon
//!
//! Runs the field simulator headless on a tokio timer, logs what it produces
//! and exports plot history as CSV.

use std::sync::Arc;

use shared::Simulator;
use tokio::sync::Mutex;

pub mod config;
pub mod error;
pub mod runner;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use runner::SimulationRunner;

/// Simulator shared between the timer task and queries
pub type SharedSimulator = Arc<Mutex<Simulator>>;

/// Build a simulator from loaded configuration
pub fn build_simulator(config: &Config) -> AppResult<SharedSimulator> {
    let sim_config = config.simulation.to_simulation_config();
    let simulator = match config.simulation.seed {
        Some(seed) => Simulator::with_seed(sim_config, seed)?,
        None => Simulator::new(sim_config)?,
    };
    Ok(Arc::new(Mutex::new(simulator)))
}
