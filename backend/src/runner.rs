//! Timer loop driving the simulator on a tokio interval

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::SharedSimulator;

/// Owns the recurring tick task. Start and stop are idempotent, and dropping
/// the runner stops the simulation.
pub struct SimulationRunner {
    simulator: SharedSimulator,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl SimulationRunner {
    pub fn new(simulator: SharedSimulator, period: Duration) -> Self {
        Self {
            simulator,
            period,
            task: None,
        }
    }

    /// Seed plots if none exist and install the recurring tick.
    /// Does nothing when already running.
    pub async fn start(&mut self) {
        if self.is_running() {
            return;
        }

        {
            let mut sim = self.simulator.lock().await;
            sim.seed_plots_if_empty(Utc::now());
        }

        let simulator = self.simulator.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            // First tick one full period after start
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let mut sim = simulator.lock().await;
                sim.tick(Utc::now());
                tracing::trace!(tick = sim.ticks(), "Simulation tick");
            }
        }));

        tracing::info!(interval_ms = self.period.as_millis() as u64, "Simulation started");
    }

    /// Cancel the recurring tick. Does nothing when not running.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("Simulation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn simulator(&self) -> &SharedSimulator {
        &self.simulator
    }
}

impl Drop for SimulationRunner {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
