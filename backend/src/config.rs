//! Configuration management for the AeroSense simulation daemon
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AEROSENSE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::SimulationConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Simulation tunables
    pub simulation: SimulationSettings,

    /// Periodic summary logging
    pub report: ReportConfig,

    /// CSV export on shutdown
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulationSettings {
    /// Milliseconds between ticks
    pub update_interval_ms: u32,

    /// Plots seeded on start
    pub plot_count: u32,

    /// Per-plot, per-tick alert probability
    pub alert_chance: f64,

    /// Alerts retained
    pub alert_capacity: u32,

    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Seconds between summary log lines; 0 disables them
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Directory for per-plot history CSV files; unset disables export
    pub directory: Option<String>,

    /// Days of history per exported plot
    pub history_days: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AEROSENSE_ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let defaults = SimulationConfig::default();

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("simulation.update_interval_ms", defaults.update_interval_ms)?
            .set_default("simulation.plot_count", defaults.plot_count)?
            .set_default("simulation.alert_chance", defaults.alert_chance)?
            .set_default("simulation.alert_capacity", defaults.alert_capacity)?
            .set_default("report.interval_secs", 30)?
            .set_default("export.history_days", 60)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AEROSENSE__ prefix)
            .add_source(
                Environment::with_prefix("AEROSENSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl SimulationSettings {
    /// Engine configuration with these settings applied over the defaults
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            update_interval_ms: self.update_interval_ms,
            plot_count: self.plot_count,
            alert_chance: self.alert_chance,
            alert_capacity: self.alert_capacity,
            ..SimulationConfig::default()
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            update_interval_ms: defaults.update_interval_ms,
            plot_count: defaults.plot_count,
            alert_chance: defaults.alert_chance,
            alert_capacity: defaults.alert_capacity,
            seed: None,
        }
    }
}
