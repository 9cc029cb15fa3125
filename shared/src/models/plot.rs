//! Farm plot models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SensorReading;

/// A monitored plot with one crop type and its latest reading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Area in acres
    pub size: u32,
    pub crop_type: String,
    pub plant_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_reading: Option<SensorReading>,
    status: PlotStatus,
}

impl Plot {
    pub(crate) fn new(
        id: String,
        name: String,
        location: String,
        size: u32,
        crop_type: String,
        plant_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            location,
            size,
            crop_type,
            plant_date,
            last_reading: None,
            status: PlotStatus::Healthy,
        }
    }

    pub fn last_reading(&self) -> Option<&SensorReading> {
        self.last_reading.as_ref()
    }

    /// Health tier derived from the last reading
    pub fn status(&self) -> PlotStatus {
        self.status
    }

    /// Replace the latest reading together with the status derived from it
    pub(crate) fn record(&mut self, reading: SensorReading, status: PlotStatus) {
        self.last_reading = Some(reading);
        self.status = status;
    }
}

/// Qualitative plot health, ordered from best to worst
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    Healthy,
    Warning,
    Critical,
}

impl PlotStatus {
    /// healthy -> warning/critical, or warning -> critical
    pub fn is_worse_than(&self, previous: PlotStatus) -> bool {
        *self > previous
    }
}

impl std::fmt::Display for PlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlotStatus::Healthy => write!(f, "healthy"),
            PlotStatus::Warning => write!(f, "warning"),
            PlotStatus::Critical => write!(f, "critical"),
        }
    }
}
