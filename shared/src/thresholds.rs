//! Metric threshold table
//!
//! A single table drives both the plot status classifier and the per-metric
//! alert severity. Each metric carries two bands: `status` decides the plot
//! health tier, `alert` decides how severe an alert about that metric is.
//! The bands intentionally differ for humidity and soil moisture.

use serde::{Deserialize, Serialize};

use crate::models::{AlertSeverity, PlotStatus, SensorReading};
use crate::types::{Metric, MetricValues};

/// Which side of a limit is unhealthy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Values strictly above the limit breach it
    Above,
    /// Values strictly below the limit breach it
    Below,
}

impl Direction {
    fn breaches(&self, value: f64, limit: f64) -> bool {
        match self {
            Direction::Above => value > limit,
            Direction::Below => value < limit,
        }
    }
}

/// Breach level of a single value against a band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Warning,
    Critical,
}

/// Warning and critical limits. A missing limit never triggers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Band {
    pub warning: Option<f64>,
    pub critical: Option<f64>,
}

impl Band {
    pub const fn new(warning: Option<f64>, critical: Option<f64>) -> Self {
        Self { warning, critical }
    }

    /// Critical is checked first so it always outranks warning
    pub fn level(&self, direction: Direction, value: f64) -> Option<Level> {
        if self.critical.is_some_and(|limit| direction.breaches(value, limit)) {
            Some(Level::Critical)
        } else if self.warning.is_some_and(|limit| direction.breaches(value, limit)) {
            Some(Level::Warning)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricThresholds {
    pub direction: Direction,
    pub status: Band,
    pub alert: Band,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThresholdTable {
    pub metrics: MetricValues<MetricThresholds>,
}

/// Thresholds used by the dashboard
pub const STANDARD_THRESHOLDS: ThresholdTable = ThresholdTable {
    metrics: MetricValues {
        temperature: MetricThresholds {
            direction: Direction::Above,
            status: Band::new(Some(30.0), Some(32.0)),
            alert: Band::new(Some(30.0), Some(32.0)),
        },
        humidity: MetricThresholds {
            direction: Direction::Below,
            status: Band::new(Some(50.0), None),
            alert: Band::new(Some(45.0), Some(35.0)),
        },
        soil_moisture: MetricThresholds {
            direction: Direction::Below,
            status: Band::new(Some(40.0), Some(30.0)),
            alert: Band::new(Some(35.0), Some(25.0)),
        },
        crop_health: MetricThresholds {
            direction: Direction::Below,
            status: Band::new(Some(70.0), Some(60.0)),
            alert: Band::new(Some(70.0), Some(60.0)),
        },
    },
};

impl Default for ThresholdTable {
    fn default() -> Self {
        STANDARD_THRESHOLDS
    }
}

impl ThresholdTable {
    pub fn get(&self, metric: Metric) -> &MetricThresholds {
        self.metrics.get(metric)
    }

    /// Plot health tier: critical if any metric is critical, otherwise
    /// warning if any metric warns, otherwise healthy.
    pub fn classify(&self, reading: &SensorReading) -> PlotStatus {
        let worst = Metric::ALL
            .iter()
            .filter_map(|&metric| {
                let t = self.get(metric);
                t.status.level(t.direction, reading.value(metric))
            })
            .max();

        match worst {
            Some(Level::Critical) => PlotStatus::Critical,
            Some(Level::Warning) => PlotStatus::Warning,
            None => PlotStatus::Healthy,
        }
    }

    /// Severity of an alert about `metric` reading `value`
    pub fn alert_severity(&self, metric: Metric, value: f64) -> AlertSeverity {
        let t = self.get(metric);
        match t.alert.level(t.direction, value) {
            Some(Level::Critical) => AlertSeverity::Critical,
            Some(Level::Warning) => AlertSeverity::Warning,
            None => AlertSeverity::Info,
        }
    }
}

/// Classify a reading with the standard thresholds
pub fn classify_reading(reading: &SensorReading) -> PlotStatus {
    STANDARD_THRESHOLDS.classify(reading)
}
