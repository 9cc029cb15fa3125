//! Dashboard summary figures

use serde::{Deserialize, Serialize};

use super::{Plot, PlotStatus};

/// Plot counts by status and fleet-wide metric averages
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub total_plots: usize,
    pub healthy_plots: usize,
    pub warning_plots: usize,
    pub critical_plots: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_soil_moisture: f64,
    pub avg_crop_health: f64,
}

impl SummaryData {
    /// Averages are taken over all plots, so a plot without a reading
    /// pulls the average towards zero.
    pub fn from_plots(plots: &[Plot]) -> Self {
        let mut summary = SummaryData {
            total_plots: plots.len(),
            ..Default::default()
        };

        for plot in plots {
            match plot.status() {
                PlotStatus::Healthy => summary.healthy_plots += 1,
                PlotStatus::Warning => summary.warning_plots += 1,
                PlotStatus::Critical => summary.critical_plots += 1,
            }
            if let Some(reading) = plot.last_reading() {
                summary.avg_temperature += reading.temperature;
                summary.avg_humidity += reading.humidity;
                summary.avg_soil_moisture += reading.soil_moisture;
                summary.avg_crop_health += reading.crop_health;
            }
        }

        if summary.total_plots > 0 {
            let n = summary.total_plots as f64;
            summary.avg_temperature /= n;
            summary.avg_humidity /= n;
            summary.avg_soil_moisture /= n;
            summary.avg_crop_health /= n;
        }

        summary
    }
}
