//! Monitoring service: dashboard-facing queries over the running simulator

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared::export::{export_filename, history_to_csv};
use shared::history::filter_by_date;
use shared::{
    crop_catalog, Alert, AlertCounts, AlertFilter, AlertStatus, Crop, DateRange, Plot,
    SensorReading, SummaryData,
};

use crate::error::{AppError, AppResult};
use crate::SharedSimulator;

/// Query facade over a shared simulator
#[derive(Clone)]
pub struct MonitoringService {
    simulator: SharedSimulator,
}

/// Everything the dashboard overview shows at once
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryData,
    pub alert_counts: AlertCounts,
    pub plots: Vec<Plot>,
    pub recent_alerts: Vec<Alert>,
}

impl MonitoringService {
    /// Alerts shown on the overview card
    pub const RECENT_ALERTS: usize = 5;

    pub fn new(simulator: SharedSimulator) -> Self {
        Self { simulator }
    }

    pub async fn plots(&self) -> Vec<Plot> {
        self.simulator.lock().await.plots().to_vec()
    }

    pub async fn plot(&self, plot_id: &str) -> AppResult<Plot> {
        self.simulator
            .lock()
            .await
            .plot(plot_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Plot {}", plot_id)))
    }

    pub fn crops(&self) -> Vec<Crop> {
        crop_catalog()
    }

    /// Alerts matching `filter`, newest first
    pub async fn alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        self.simulator.lock().await.filter_alerts(filter)
    }

    pub async fn alert_counts(&self) -> AlertCounts {
        self.simulator.lock().await.alert_counts()
    }

    pub async fn update_alert_status(&self, alert_id: Uuid, status: AlertStatus) -> AppResult<Alert> {
        let updated = self
            .simulator
            .lock()
            .await
            .update_alert_status(alert_id, status)
            .ok_or_else(|| AppError::NotFound(format!("Alert {}", alert_id)))?;

        tracing::info!(alert = %alert_id, status = %status, "Alert status updated");
        Ok(updated)
    }

    pub async fn acknowledge_alert(&self, alert_id: Uuid) -> AppResult<Alert> {
        self.update_alert_status(alert_id, AlertStatus::Acknowledged).await
    }

    pub async fn resolve_alert(&self, alert_id: Uuid) -> AppResult<Alert> {
        self.update_alert_status(alert_id, AlertStatus::Resolved).await
    }

    pub async fn summary(&self) -> SummaryData {
        self.simulator.lock().await.summary()
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let sim = self.simulator.lock().await;
        DashboardSnapshot {
            generated_at: Utc::now(),
            summary: sim.summary(),
            alert_counts: sim.alert_counts(),
            plots: sim.plots().to_vec(),
            recent_alerts: sim
                .alert_log()
                .iter()
                .take(Self::RECENT_ALERTS)
                .cloned()
                .collect(),
        }
    }

    /// Historical readings for a plot, optionally narrowed to a date range
    pub async fn history(
        &self,
        plot_id: &str,
        days: u32,
        range: &DateRange,
    ) -> AppResult<Vec<SensorReading>> {
        self.history_at(plot_id, days, range, Utc::now()).await
    }

    /// Same as [`history`](Self::history), with the window ending on `now`'s day
    pub async fn history_at(
        &self,
        plot_id: &str,
        days: u32,
        range: &DateRange,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<SensorReading>> {
        let readings = self
            .simulator
            .lock()
            .await
            .history(plot_id, days, now)?;
        Ok(filter_by_date(&readings, range))
    }

    pub async fn export_history_csv(
        &self,
        plot_id: &str,
        days: u32,
        range: &DateRange,
    ) -> AppResult<String> {
        let readings = self.history(plot_id, days, range).await?;
        Ok(history_to_csv(&readings)?)
    }

    /// Write one CSV per plot into `directory`, returning the files written
    pub async fn export_all(&self, directory: &Path, days: u32) -> AppResult<Vec<PathBuf>> {
        tokio::fs::create_dir_all(directory).await?;

        let today = Utc::now().date_naive();
        let mut written = Vec::new();
        for plot in self.plots().await {
            let csv = self
                .export_history_csv(&plot.id, days, &DateRange::default())
                .await?;
            let path = directory.join(export_filename(&plot.id, today));
            tokio::fs::write(&path, csv).await?;
            tracing::info!(plot = %plot.id, path = %path.display(), "Exported plot history");
            written.push(path);
        }
        Ok(written)
    }

    /// Write the current dashboard snapshot as pretty JSON
    pub async fn export_snapshot(&self, path: &Path) -> AppResult<()> {
        let snapshot = self.snapshot().await;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::Export(format!("Snapshot serialization error: {}", e)))?;
        tokio::fs::write(path, json).await?;
        tracing::info!(path = %path.display(), "Exported dashboard snapshot");
        Ok(())
    }
}
