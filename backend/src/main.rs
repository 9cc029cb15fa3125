//! AeroSense Field Simulation - Daemon
//!
//! Drives the simulated sensor network on a fixed interval, logs periodic
//! summaries and exports per-plot history on shutdown.

use std::path::Path;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aerosense_backend::services::MonitoringService;
use aerosense_backend::{build_simulator, Config, SimulationRunner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerosense_sim=debug,aerosense_backend=debug,shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting AeroSense field simulation");
    tracing::info!("Environment: {}", config.environment);

    let simulator = build_simulator(&config)?;
    let service = MonitoringService::new(simulator.clone());
    let period = config.simulation.to_simulation_config().update_interval();

    let mut runner = SimulationRunner::new(simulator, period);
    runner.start().await;

    let report_every = config.report.interval_secs;
    if report_every > 0 {
        let mut report = tokio::time::interval(Duration::from_secs(report_every));
        report.tick().await;
        loop {
            tokio::select! {
                _ = report.tick() => log_summary(&service).await,
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    } else {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutdown requested");
    runner.stop();

    if let Some(directory) = &config.export.directory {
        let directory = Path::new(directory);
        let written = service
            .export_all(directory, config.export.history_days)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code(), "Export failed: {}", e);
                e
            })?;
        service.export_snapshot(&directory.join("snapshot.json")).await?;
        tracing::info!(files = written.len(), "History export complete");
    }

    Ok(())
}

async fn log_summary(service: &MonitoringService) {
    let summary = service.summary().await;
    let counts = service.alert_counts().await;
    tracing::info!(
        plots = summary.total_plots,
        healthy = summary.healthy_plots,
        warning = summary.warning_plots,
        critical = summary.critical_plots,
        avg_temperature = summary.avg_temperature,
        avg_humidity = summary.avg_humidity,
        avg_soil_moisture = summary.avg_soil_moisture,
        avg_crop_health = summary.avg_crop_health,
        active_alerts = counts.active,
        critical_alerts = counts.critical,
        "Field summary"
    );
}
