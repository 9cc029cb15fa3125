//! Reading generator
//!
//! Bounded random walk: each metric moves by at most its change rate per
//! step and never leaves its configured range.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::models::SensorReading;
use crate::types::{Bounds, MetricRange};

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Random UUID drawn from the simulator's own source, so seeded runs are
/// reproducible end to end.
pub fn random_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// Next value of a bounded random walk:
/// `clamp(current + uniform(-rate, rate), min, max)` rounded to one decimal.
pub fn next_value<R: Rng + ?Sized>(rng: &mut R, current: f64, range: &MetricRange) -> f64 {
    let rate = range.change_rate.abs();
    let change = if rate > 0.0 {
        rng.gen_range(-rate..=rate)
    } else {
        0.0
    };
    let stepped = (current + change).clamp(range.min, range.max);
    round_to_tenth(stepped).clamp(range.min, range.max)
}

/// Uniform draw from `bounds`, rounded to one decimal
pub fn initial_value<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> f64 {
    let value = rng.gen_range(bounds.min..=bounds.max);
    round_to_tenth(value).clamp(bounds.min, bounds.max)
}

/// Generate the next reading for a plot.
///
/// Without a previous reading every metric is drawn from the initial ranges;
/// otherwise each metric takes one random-walk step from its previous value.
pub fn next_reading<R: Rng + ?Sized>(
    rng: &mut R,
    plot_id: &str,
    previous: Option<&SensorReading>,
    config: &SimulationConfig,
    now: DateTime<Utc>,
) -> SensorReading {
    let values = match previous {
        Some(prev) => config
            .ranges
            .map(|metric, range| next_value(rng, prev.value(metric), range)),
        None => config.initial.map(|_, bounds| initial_value(rng, bounds)),
    };

    SensorReading {
        id: random_id(rng),
        timestamp: now,
        temperature: values.temperature,
        humidity: values.humidity,
        soil_moisture: values.soil_moisture,
        crop_health: values.crop_health,
        plot_id: plot_id.to_string(),
    }
}
