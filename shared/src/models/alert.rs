//! Alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Metric;

/// A generated notification about a metric anomaly on a plot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub alert_type: Metric,
    pub severity: AlertSeverity,
    pub message: String,
    pub plot_id: String,
    pub plot_name: String,
    pub status: AlertStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "info"),
            AlertSeverity::Warning => write!(f, "warning"),
            AlertSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Lifecycle of an alert. Transitions are driven by the user and are not
/// restricted: any status may be set at any time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Acknowledged,
    Resolved,
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::Active => write!(f, "active"),
            AlertStatus::Acknowledged => write!(f, "acknowledged"),
            AlertStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AlertStatus::Active),
            "acknowledged" => Ok(AlertStatus::Acknowledged),
            "resolved" => Ok(AlertStatus::Resolved),
            other => Err(format!("unknown alert status: {}", other)),
        }
    }
}

/// Alert list filter as offered by the alerts page.
/// Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFilter {
    /// Case-insensitive substring of the plot name or message
    pub query: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
    pub alert_type: Option<Metric>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        let matches_query = match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                alert.plot_name.to_lowercase().contains(&query)
                    || alert.message.to_lowercase().contains(&query)
            }
        };

        matches_query
            && self.severity.map_or(true, |s| alert.severity == s)
            && self.status.map_or(true, |s| alert.status == s)
            && self.alert_type.map_or(true, |t| alert.alert_type == t)
    }

    pub fn apply<'a>(&self, alerts: impl IntoIterator<Item = &'a Alert>) -> Vec<Alert> {
        alerts
            .into_iter()
            .filter(|alert| self.matches(alert))
            .cloned()
            .collect()
    }
}

/// Per-status and critical tallies over an alert list
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertCounts {
    pub total: usize,
    pub active: usize,
    pub acknowledged: usize,
    pub resolved: usize,
    pub critical: usize,
}

impl AlertCounts {
    pub fn from_alerts<'a>(alerts: impl IntoIterator<Item = &'a Alert>) -> Self {
        alerts.into_iter().fold(Self::default(), |mut counts, alert| {
            counts.total += 1;
            match alert.status {
                AlertStatus::Active => counts.active += 1,
                AlertStatus::Acknowledged => counts.acknowledged += 1,
                AlertStatus::Resolved => counts.resolved += 1,
            }
            if alert.severity == AlertSeverity::Critical {
                counts.critical += 1;
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(plot_name: &str, message: &str, severity: AlertSeverity, status: AlertStatus) -> Alert {
        Alert {
            id: Uuid::nil(),
            timestamp: Utc::now(),
            alert_type: Metric::Humidity,
            severity,
            message: message.to_string(),
            plot_id: "plot-1".to_string(),
            plot_name: plot_name.to_string(),
            status,
        }
    }

    #[test]
    fn test_filter_query_is_case_insensitive() {
        let a = alert("Plot A7", "Low humidity levels detected (41.0%)", AlertSeverity::Warning, AlertStatus::Active);
        let filter = AlertFilter {
            query: Some("HUMIDITY".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&a));

        let filter = AlertFilter {
            query: Some("a7".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&a));

        let filter = AlertFilter {
            query: Some("soil".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&a));
    }

    #[test]
    fn test_filter_combines_fields() {
        let a = alert("Plot B2", "msg", AlertSeverity::Critical, AlertStatus::Resolved);
        let filter = AlertFilter {
            severity: Some(AlertSeverity::Critical),
            status: Some(AlertStatus::Active),
            ..Default::default()
        };
        assert!(!filter.matches(&a));

        let filter = AlertFilter {
            severity: Some(AlertSeverity::Critical),
            status: Some(AlertStatus::Resolved),
            alert_type: Some(Metric::Humidity),
            query: Some("  ".to_string()),
        };
        assert!(filter.matches(&a));
    }

    #[test]
    fn test_alert_counts() {
        let alerts = vec![
            alert("A", "m", AlertSeverity::Critical, AlertStatus::Active),
            alert("B", "m", AlertSeverity::Info, AlertStatus::Acknowledged),
            alert("C", "m", AlertSeverity::Critical, AlertStatus::Resolved),
            alert("D", "m", AlertSeverity::Warning, AlertStatus::Active),
        ];
        let counts = AlertCounts::from_alerts(&alerts);
        assert_eq!(
            counts,
            AlertCounts {
                total: 4,
                active: 2,
                acknowledged: 1,
                resolved: 1,
                critical: 2,
            }
        );
    }

    #[test]
    fn test_alert_serializes_type_field() {
        let a = alert("A", "m", AlertSeverity::Warning, AlertStatus::Active);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["type"], "humidity");
        assert_eq!(json["plotName"], "A");
        assert_eq!(json["status"], "active");
    }
}
