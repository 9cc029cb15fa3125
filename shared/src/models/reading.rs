//! Sensor reading models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Metric, MetricValues};

/// One timestamped snapshot of the four simulated metrics for a plot.
///
/// Readings are never mutated; each tick supersedes the previous one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Volumetric soil moisture in percent
    pub soil_moisture: f64,
    /// Crop health index (0-100)
    pub crop_health: f64,
    pub plot_id: String,
}

impl SensorReading {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::SoilMoisture => self.soil_moisture,
            Metric::CropHealth => self.crop_health,
        }
    }

    pub fn values(&self) -> MetricValues<f64> {
        MetricValues {
            temperature: self.temperature,
            humidity: self.humidity,
            soil_moisture: self.soil_moisture,
            crop_health: self.crop_health,
        }
    }
}
