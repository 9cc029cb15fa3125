//! Alert synthesis and the bounded alert log

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::generator::random_id;
use crate::models::{Alert, AlertSeverity, AlertStatus, Plot, PlotStatus, SensorReading};
use crate::thresholds::ThresholdTable;
use crate::types::Metric;

/// Newest-first alert list that evicts the oldest entries past `capacity`
#[derive(Debug, Clone)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
    capacity: usize,
}

impl AlertLog {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            alerts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, alert: Alert) {
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Alerts, newest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    pub fn set_status(&mut self, id: Uuid, status: AlertStatus) -> Option<Alert> {
        let alert = self.alerts.iter_mut().find(|alert| alert.id == id)?;
        alert.status = status;
        Some(alert.clone())
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// An alert fires when the plot's status worsened, or independently with
/// probability `chance`. A non-finite chance never fires at random.
pub fn should_alert<R: Rng + ?Sized>(
    rng: &mut R,
    previous: PlotStatus,
    current: PlotStatus,
    chance: f64,
) -> bool {
    current.is_worse_than(previous)
        || (chance.is_finite() && rng.gen_bool(chance.clamp(0.0, 1.0)))
}

/// Human readable alert text for a metric value at a given severity
pub fn alert_message(metric: Metric, severity: AlertSeverity, value: f64) -> String {
    let v = format!("{:.1}", value);
    match (metric, severity) {
        (Metric::Temperature, AlertSeverity::Critical) => {
            format!("Critically high temperature detected ({}°C)", v)
        }
        (Metric::Temperature, AlertSeverity::Warning) => {
            format!("Elevated temperature detected ({}°C)", v)
        }
        (Metric::Temperature, AlertSeverity::Info) => {
            format!("Temperature change detected ({}°C)", v)
        }
        (Metric::Humidity, AlertSeverity::Critical) => {
            format!("Critically low humidity levels detected ({}%)", v)
        }
        (Metric::Humidity, AlertSeverity::Warning) => {
            format!("Low humidity levels detected ({}%)", v)
        }
        (Metric::Humidity, AlertSeverity::Info) => format!("Humidity change detected ({}%)", v),
        (Metric::SoilMoisture, AlertSeverity::Critical) => {
            format!("Critically low soil moisture detected ({}%)", v)
        }
        (Metric::SoilMoisture, AlertSeverity::Warning) => {
            format!("Low soil moisture detected ({}%)", v)
        }
        (Metric::SoilMoisture, AlertSeverity::Info) => {
            format!("Soil moisture change detected ({}%)", v)
        }
        (Metric::CropHealth, AlertSeverity::Critical) => {
            format!("Critical crop health index detected ({})", v)
        }
        (Metric::CropHealth, AlertSeverity::Warning) => {
            format!("Declining crop health index detected ({})", v)
        }
        (Metric::CropHealth, AlertSeverity::Info) => format!("Crop health change detected ({})", v),
    }
}

/// Build an alert about one uniformly chosen metric of `reading`.
/// Severity comes from that metric's alert band alone.
pub fn synthesize_alert<R: Rng + ?Sized>(
    rng: &mut R,
    thresholds: &ThresholdTable,
    plot: &Plot,
    reading: &SensorReading,
    now: DateTime<Utc>,
) -> Alert {
    let metric = *Metric::ALL
        .choose(rng)
        .unwrap_or(&Metric::Temperature);
    let value = reading.value(metric);
    let severity = thresholds.alert_severity(metric, value);

    Alert {
        id: random_id(rng),
        timestamp: now,
        alert_type: metric,
        severity,
        message: alert_message(metric, severity, value),
        plot_id: plot.id.clone(),
        plot_name: plot.name.clone(),
        status: AlertStatus::Active,
    }
}
