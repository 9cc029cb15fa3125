//! Common types used across the simulation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The four simulated environmental metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Temperature,
    Humidity,
    SoilMoisture,
    CropHealth,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::Humidity,
        Metric::SoilMoisture,
        Metric::CropHealth,
    ];

    /// Human readable name, as used in CSV headers and charts
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::SoilMoisture => "Soil Moisture",
            Metric::CropHealth => "Crop Health",
        }
    }

    /// Display unit suffix. Crop health is a unitless index.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity | Metric::SoilMoisture => "%",
            Metric::CropHealth => "",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Temperature => write!(f, "temperature"),
            Metric::Humidity => write!(f, "humidity"),
            Metric::SoilMoisture => write!(f, "soilMoisture"),
            Metric::CropHealth => write!(f, "cropHealth"),
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "soilMoisture" | "soil_moisture" => Ok(Metric::SoilMoisture),
            "cropHealth" | "crop_health" => Ok(Metric::CropHealth),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

/// One value per metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricValues<T> {
    pub temperature: T,
    pub humidity: T,
    pub soil_moisture: T,
    pub crop_health: T,
}

impl<T> MetricValues<T> {
    pub fn get(&self, metric: Metric) -> &T {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::SoilMoisture => &self.soil_moisture,
            Metric::CropHealth => &self.crop_health,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Metric, &T) -> U) -> MetricValues<U> {
        MetricValues {
            temperature: f(Metric::Temperature, &self.temperature),
            humidity: f(Metric::Humidity, &self.humidity),
            soil_moisture: f(Metric::SoilMoisture, &self.soil_moisture),
            crop_health: f(Metric::CropHealth, &self.crop_health),
        }
    }
}

/// Closed numeric interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether this interval lies entirely inside `outer`
    pub fn is_within(&self, outer: &Bounds) -> bool {
        self.min >= outer.min && self.max <= outer.max
    }
}

/// Random-walk parameters for a single metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
    /// Largest step, in either direction, between two consecutive readings
    pub change_rate: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64, change_rate: f64) -> Self {
        Self {
            min,
            max,
            change_rate,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }
}

/// Calendar date filter for historical readings.
///
/// Both ends are inclusive: `to` covers the whole day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}
