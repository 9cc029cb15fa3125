//! Simulation parameters

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Bounds, MetricRange, MetricValues};
use crate::validation::validate_metric_ranges;

/// Tunables for the simulator and its timer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_metric_ranges"))]
pub struct SimulationConfig {
    /// Milliseconds between ticks
    #[validate(range(min = 100))]
    pub update_interval_ms: u32,

    /// Plots created when the simulation first starts.
    /// Plot names use one letter per plot, hence the upper bound.
    #[validate(range(min = 1, max = 26))]
    pub plot_count: u32,

    /// Per-plot, per-tick probability of an alert without a status change
    #[validate(range(min = 0.0, max = 1.0))]
    pub alert_chance: f64,

    /// Maximum number of alerts retained
    #[validate(range(min = 1))]
    pub alert_capacity: u32,

    /// Random-walk limits and step sizes
    pub ranges: MetricValues<MetricRange>,

    /// Ranges for a plot's first reading
    pub initial: MetricValues<Bounds>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 5000,
            plot_count: 8,
            alert_chance: 0.1,
            alert_capacity: 100,
            ranges: MetricValues {
                temperature: MetricRange::new(15.0, 35.0, 0.5),
                humidity: MetricRange::new(30.0, 90.0, 2.0),
                soil_moisture: MetricRange::new(20.0, 80.0, 1.0),
                crop_health: MetricRange::new(50.0, 100.0, 0.5),
            },
            initial: MetricValues {
                temperature: Bounds::new(20.0, 35.0),
                humidity: Bounds::new(40.0, 90.0),
                soil_moisture: Bounds::new(20.0, 80.0),
                crop_health: Bounds::new(50.0, 100.0),
            },
        }
    }
}

impl SimulationConfig {
    pub fn update_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(self.update_interval_ms))
    }
}
