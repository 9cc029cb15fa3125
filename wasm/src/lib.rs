//! WebAssembly module for the AeroSense dashboard
//!
//! Runs the field simulator inside the browser:
//! - Timer-driven ticks via `setInterval`
//! - JSON views of plots, alerts and the summary
//! - Historical series and CSV export for the charts page

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use shared::export::{export_filename, history_to_csv};
use shared::history::{filter_by_date, DEFAULT_HISTORY_DAYS};
use shared::{
    classify_reading, crop_catalog, AlertFilter, AlertStatus, DateRange, SensorReading,
    SimulationConfig, Simulator,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn parse_date(value: Option<String>) -> Result<Option<NaiveDate>, JsValue> {
    value
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|e| js_error(format!("Invalid date '{}': {}", s, e)))
        })
        .transpose()
}

/// Browser-side simulation handle
#[wasm_bindgen]
pub struct Dashboard {
    simulator: Rc<RefCell<Simulator>>,
    interval_id: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl Dashboard {
    /// Create a dashboard from an optional `SimulationConfig` JSON document
    /// and an optional seed.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, seed: Option<u64>) -> Result<Dashboard, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => serde_json::from_str::<SimulationConfig>(json)
                .map_err(|e| js_error(format!("Invalid config JSON: {}", e)))?,
            _ => SimulationConfig::default(),
        };

        let simulator = match seed {
            Some(seed) => Simulator::with_seed(config, seed),
            None => Simulator::new(config),
        }
        .map_err(js_error)?;

        Ok(Self {
            simulator: Rc::new(RefCell::new(simulator)),
            interval_id: None,
            callback: None,
        })
    }

    /// Seed plots if needed and begin ticking. Calling it while running
    /// does nothing.
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.interval_id.is_some() {
            return Ok(());
        }

        let window = web_sys::window().ok_or_else(|| js_error("No window available"))?;
        let period = {
            let mut sim = self.simulator.borrow_mut();
            sim.seed_plots_if_empty(Utc::now());
            sim.config().update_interval_ms
        };

        let simulator = Rc::clone(&self.simulator);
        let callback = Closure::<dyn FnMut()>::new(move || {
            simulator.borrow_mut().tick(Utc::now());
        });

        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref::<js_sys::Function>(),
            i32::try_from(period).unwrap_or(i32::MAX),
        )?;

        self.interval_id = Some(id);
        self.callback = Some(callback);
        web_sys::console::log_1(&format!("Simulation started ({} ms)", period).into());
        Ok(())
    }

    /// Cancel the pending interval. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(id) = self.interval_id.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
            self.callback = None;
            web_sys::console::log_1(&"Simulation stopped".into());
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.interval_id.is_some()
    }

    /// Seed the configured plots without starting the timer
    #[wasm_bindgen(js_name = seedPlots)]
    pub fn seed_plots(&mut self) -> usize {
        self.simulator.borrow_mut().seed_plots_if_empty(Utc::now()).len()
    }

    /// Apply a single tick immediately
    pub fn tick(&mut self) {
        self.simulator.borrow_mut().tick(Utc::now());
    }

    #[wasm_bindgen(js_name = plotsJson)]
    pub fn plots_json(&self) -> Result<String, JsValue> {
        to_json(self.simulator.borrow().plots())
    }

    #[wasm_bindgen(js_name = plotJson)]
    pub fn plot_json(&self, plot_id: &str) -> Result<String, JsValue> {
        let sim = self.simulator.borrow();
        let plot = sim
            .plot(plot_id)
            .ok_or_else(|| js_error(format!("Unknown plot: {}", plot_id)))?;
        to_json(plot)
    }

    /// Alerts newest first, narrowed by an optional `AlertFilter` JSON document
    #[wasm_bindgen(js_name = alertsJson)]
    pub fn alerts_json(&self, filter_json: Option<String>) -> Result<String, JsValue> {
        let filter = match filter_json.as_deref() {
            Some(json) if !json.trim().is_empty() => serde_json::from_str::<AlertFilter>(json)
                .map_err(|e| js_error(format!("Invalid filter JSON: {}", e)))?,
            _ => AlertFilter::default(),
        };
        to_json(&self.simulator.borrow().filter_alerts(&filter))
    }

    #[wasm_bindgen(js_name = alertCountsJson)]
    pub fn alert_counts_json(&self) -> Result<String, JsValue> {
        to_json(&self.simulator.borrow().alert_counts())
    }

    /// Set an alert to `active`, `acknowledged` or `resolved`
    #[wasm_bindgen(js_name = updateAlertStatus)]
    pub fn update_alert_status(&mut self, alert_id: &str, status: &str) -> Result<String, JsValue> {
        let id = Uuid::parse_str(alert_id).map_err(js_error)?;
        let status: AlertStatus = status.parse().map_err(js_error)?;
        let alert = self
            .simulator
            .borrow_mut()
            .update_alert_status(id, status)
            .ok_or_else(|| js_error(format!("Unknown alert: {}", alert_id)))?;
        to_json(&alert)
    }

    #[wasm_bindgen(js_name = summaryJson)]
    pub fn summary_json(&self) -> Result<String, JsValue> {
        to_json(&self.simulator.borrow().summary())
    }

    /// Historical readings for a plot. Dates are `YYYY-MM-DD`, inclusive.
    #[wasm_bindgen(js_name = historyJson)]
    pub fn history_json(
        &mut self,
        plot_id: &str,
        days: Option<u32>,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<String, JsValue> {
        let readings = self.history(plot_id, days, from, to)?;
        to_json(&readings)
    }

    #[wasm_bindgen(js_name = exportHistoryCsv)]
    pub fn export_history_csv(
        &mut self,
        plot_id: &str,
        days: Option<u32>,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<String, JsValue> {
        let readings = self.history(plot_id, days, from, to)?;
        history_to_csv(&readings).map_err(js_error)
    }

    #[wasm_bindgen(js_name = exportFilename)]
    pub fn export_filename(&self, plot_id: &str) -> String {
        export_filename(plot_id, Utc::now().date_naive())
    }
}

impl Dashboard {
    fn history(
        &mut self,
        plot_id: &str,
        days: Option<u32>,
        from: Option<String>,
        to: Option<String>,
    ) -> Result<Vec<SensorReading>, JsValue> {
        let range = DateRange::new(parse_date(from)?, parse_date(to)?);
        let readings = self
            .simulator
            .borrow_mut()
            .history(plot_id, days.unwrap_or(DEFAULT_HISTORY_DAYS), Utc::now())
            .map_err(js_error)?;
        Ok(filter_by_date(&readings, &range))
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The static crop catalog as JSON
#[wasm_bindgen(js_name = cropsJson)]
pub fn crops_json() -> Result<String, JsValue> {
    to_json(&crop_catalog())
}

/// Status tier for a single set of readings
#[wasm_bindgen(js_name = classifyReadingStatus)]
pub fn classify_reading_status(
    temperature: f64,
    humidity: f64,
    soil_moisture: f64,
    crop_health: f64,
) -> String {
    let reading = SensorReading {
        id: Uuid::nil(),
        timestamp: Utc::now(),
        temperature,
        humidity,
        soil_moisture,
        crop_health,
        plot_id: String::new(),
    };
    classify_reading(&reading).to_string()
}
