//! The field simulator
//!
//! Owns the plot registry, the alert log and the random source. It has no
//! clock or timer of its own: drivers call [`Simulator::tick`] on a fixed
//! interval and pass the current time in.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::error::{SimulationError, SimulationResult};
use crate::generator::next_reading;
use crate::history::{historical_data, MAX_HISTORY_DAYS};
use crate::models::{
    Alert, AlertCounts, AlertFilter, AlertStatus, Plot, SensorReading, SummaryData, CROP_NAMES,
};
use crate::synthesizer::{should_alert, synthesize_alert, AlertLog};
use crate::thresholds::ThresholdTable;
use crate::validation::validate_simulation_config;

const LOCATIONS: [&str; 5] = [
    "North Field",
    "South Field",
    "East Field",
    "West Field",
    "Central Field",
];

pub struct Simulator<R: Rng = StdRng> {
    config: SimulationConfig,
    thresholds: ThresholdTable,
    rng: R,
    plots: Vec<Plot>,
    alerts: AlertLog,
    ticks: u64,
}

impl Simulator<StdRng> {
    /// Simulator seeded from OS entropy
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible simulator
    pub fn with_seed(config: SimulationConfig, seed: u64) -> SimulationResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> SimulationResult<Self> {
        validate_simulation_config(&config)?;
        let alerts = AlertLog::new(config.alert_capacity as usize);
        Ok(Self {
            config,
            thresholds: ThresholdTable::default(),
            rng,
            plots: Vec::new(),
            alerts,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// Create `count` plots, each with a first reading. Does nothing when
    /// plots already exist.
    pub fn seed_plots(&mut self, count: u32, now: DateTime<Utc>) -> &[Plot] {
        if !self.plots.is_empty() {
            return &self.plots;
        }

        for i in 0..count {
            let id = format!("plot-{}", i + 1);
            let letter = char::from_u32('A' as u32 + i % 26).unwrap_or('A');
            let name = format!("Plot {}{}", letter, self.rng.gen_range(1..=20));
            let location = LOCATIONS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(LOCATIONS[0])
                .to_string();
            let size = self.rng.gen_range(1..=10);
            let crop_type = CROP_NAMES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CROP_NAMES[0])
                .to_string();
            let plant_date = now - Duration::days(self.rng.gen_range(0..60));

            let mut plot = Plot::new(id, name, location, size, crop_type, plant_date);
            let reading = next_reading(&mut self.rng, &plot.id, None, &self.config, now);
            let status = self.thresholds.classify(&reading);
            plot.record(reading, status);
            self.plots.push(plot);
        }

        tracing::debug!(count = self.plots.len(), "Seeded plots");
        &self.plots
    }

    /// Seed the configured number of plots when none exist
    pub fn seed_plots_if_empty(&mut self, now: DateTime<Utc>) -> &[Plot] {
        self.seed_plots(self.config.plot_count, now)
    }

    /// Advance every plot by one reading, reclassify it and possibly raise
    /// an alert.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for plot in &mut self.plots {
            let reading = next_reading(
                &mut self.rng,
                &plot.id,
                plot.last_reading(),
                &self.config,
                now,
            );
            let previous = plot.status();
            let status = self.thresholds.classify(&reading);

            if status != previous {
                tracing::debug!(plot = %plot.id, from = %previous, to = %status, "Plot status changed");
            }

            if should_alert(&mut self.rng, previous, status, self.config.alert_chance) {
                let alert = synthesize_alert(&mut self.rng, &self.thresholds, plot, &reading, now);
                tracing::debug!(
                    plot = %plot.id,
                    severity = %alert.severity,
                    metric = %alert.alert_type,
                    "{}",
                    alert.message
                );
                self.alerts.push(alert);
            }

            plot.record(reading, status);
        }

        self.ticks += 1;
    }

    /// Number of ticks applied so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot(&self, id: &str) -> Option<&Plot> {
        self.plots.iter().find(|plot| plot.id == id)
    }

    /// Alerts, newest first
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }

    pub fn alert_log(&self) -> &AlertLog {
        &self.alerts
    }

    pub fn alert(&self, id: Uuid) -> Option<&Alert> {
        self.alerts.get(id)
    }

    pub fn filter_alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        filter.apply(self.alerts.iter())
    }

    pub fn alert_counts(&self) -> AlertCounts {
        AlertCounts::from_alerts(self.alerts.iter())
    }

    /// Set an alert's status. Returns the updated alert, or `None` when the
    /// id is unknown (including alerts already evicted from the log).
    pub fn update_alert_status(&mut self, id: Uuid, status: AlertStatus) -> Option<Alert> {
        self.alerts.set_status(id, status)
    }

    pub fn summary(&self) -> SummaryData {
        SummaryData::from_plots(&self.plots)
    }

    /// Historical series for a known plot, drawn from the simulator's
    /// random source. Windows longer than [`MAX_HISTORY_DAYS`] are rejected.
    pub fn history(
        &mut self,
        plot_id: &str,
        days: u32,
        now: DateTime<Utc>,
    ) -> SimulationResult<Vec<SensorReading>> {
        if self.plot(plot_id).is_none() {
            return Err(SimulationError::UnknownPlot(plot_id.to_string()));
        }
        if days > MAX_HISTORY_DAYS {
            return Err(SimulationError::InvalidHistoryWindow(days, MAX_HISTORY_DAYS));
        }
        Ok(historical_data(&mut self.rng, plot_id, days, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlotStatus;
    use crate::types::Metric;

    fn simulator(seed: u64) -> Simulator {
        Simulator::with_seed(SimulationConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_seed_plots_once() {
        let mut sim = simulator(1);
        let now = Utc::now();
        assert_eq!(sim.seed_plots_if_empty(now).len(), 8);
        assert_eq!(sim.seed_plots(3, now).len(), 8);

        let plot = &sim.plots()[2];
        assert_eq!(plot.id, "plot-3");
        assert!(plot.name.starts_with("Plot C"));
        assert!((1..=10).contains(&plot.size));
        assert!(CROP_NAMES.contains(&plot.crop_type.as_str()));
        assert!(LOCATIONS.contains(&plot.location.as_str()));
        assert!(plot.plant_date <= now && plot.plant_date > now - Duration::days(60));
        assert!(plot.last_reading().is_some());
    }

    #[test]
    fn test_status_matches_reading_after_ticks() {
        let mut sim = simulator(2);
        let now = Utc::now();
        sim.seed_plots_if_empty(now);
        for n in 0..50 {
            sim.tick(now + Duration::seconds(5 * n));
            for plot in sim.plots() {
                let reading = plot.last_reading().unwrap();
                assert_eq!(plot.status(), sim.thresholds().classify(reading));
            }
        }
        assert_eq!(sim.ticks(), 50);
    }

    #[test]
    fn test_readings_supersede_previous() {
        let mut sim = simulator(3);
        let now = Utc::now();
        sim.seed_plots(1, now);
        let before = sim.plots()[0].last_reading().unwrap().clone();
        sim.tick(now + Duration::seconds(5));
        let after = sim.plots()[0].last_reading().unwrap();
        assert_ne!(before.id, after.id);
        for metric in Metric::ALL {
            let step = sim.config().ranges.get(metric).change_rate;
            assert!((after.value(metric) - before.value(metric)).abs() <= step + 0.05 + 1e-9);
        }
    }

    #[test]
    fn test_alert_log_is_capped() {
        let config = SimulationConfig {
            alert_chance: 1.0,
            ..Default::default()
        };
        let mut sim = Simulator::with_seed(config, 4).unwrap();
        let now = Utc::now();
        sim.seed_plots_if_empty(now);
        for _ in 0..20 {
            sim.tick(now);
        }
        // 8 plots * 20 ticks, all alerting
        assert_eq!(sim.alerts().len(), 100);
    }

    #[test]
    fn test_update_alert_status() {
        let config = SimulationConfig {
            alert_chance: 1.0,
            ..Default::default()
        };
        let mut sim = Simulator::with_seed(config, 5).unwrap();
        let now = Utc::now();
        sim.seed_plots_if_empty(now);
        sim.tick(now);

        let id = sim.alerts()[0].id;
        let updated = sim.update_alert_status(id, AlertStatus::Acknowledged).unwrap();
        assert_eq!(updated.status, AlertStatus::Acknowledged);
        assert_eq!(sim.alert_counts().acknowledged, 1);
        assert!(sim.update_alert_status(Uuid::nil(), AlertStatus::Resolved).is_none());
    }

    #[test]
    fn test_history_requires_known_plot() {
        let mut sim = simulator(6);
        sim.seed_plots(2, Utc::now());
        assert_eq!(sim.history("plot-2", 3, Utc::now()).unwrap().len(), 12);
        assert!(matches!(
            sim.history("plot-9", 3, Utc::now()),
            Err(SimulationError::UnknownPlot(_))
        ));
    }

    #[test]
    fn test_history_rejects_oversized_window() {
        let mut sim = simulator(6);
        let now = Utc::now();
        sim.seed_plots(1, now);
        assert!(matches!(
            sim.history("plot-1", 1_500_000_000, now),
            Err(SimulationError::InvalidHistoryWindow(1_500_000_000, MAX_HISTORY_DAYS))
        ));
        assert_eq!(
            sim.history("plot-1", MAX_HISTORY_DAYS, now).unwrap().len(),
            (MAX_HISTORY_DAYS * 4) as usize
        );
    }

    #[test]
    fn test_summary_counts_statuses() {
        let mut sim = simulator(7);
        sim.seed_plots_if_empty(Utc::now());
        let summary = sim.summary();
        assert_eq!(summary.total_plots, 8);
        let by_status = sim
            .plots()
            .iter()
            .filter(|p| p.status() == PlotStatus::Healthy)
            .count();
        assert_eq!(summary.healthy_plots, by_status);
        assert_eq!(
            summary.healthy_plots + summary.warning_plots + summary.critical_plots,
            8
        );
        assert!(summary.avg_temperature >= 20.0 && summary.avg_temperature <= 35.0);
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let sim = simulator(8);
        assert_eq!(sim.summary(), SummaryData::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            update_interval_ms: 10,
            ..Default::default()
        };
        assert!(Simulator::with_seed(config, 0).is_err());
    }
}
