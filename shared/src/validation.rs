//! Validation utilities for simulation settings and readings

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::types::{Bounds, Metric, MetricRange};

// ============================================================================
// Range Validations
// ============================================================================

/// Validate a random-walk range: ordered limits, non-negative step
pub fn validate_walk_range(range: &MetricRange) -> Result<(), &'static str> {
    if !range.min.is_finite() || !range.max.is_finite() || !range.change_rate.is_finite() {
        return Err("Range values must be finite");
    }
    if range.min >= range.max {
        return Err("Range minimum must be below its maximum");
    }
    if range.change_rate < 0.0 {
        return Err("Change rate cannot be negative");
    }
    Ok(())
}

/// Validate that a first-reading range is ordered and inside the walk range
pub fn validate_initial_bounds(initial: &Bounds, walk: &MetricRange) -> Result<(), &'static str> {
    if initial.min >= initial.max {
        return Err("Initial range minimum must be below its maximum");
    }
    if !initial.is_within(&walk.bounds()) {
        return Err("Initial range must lie inside the random-walk range");
    }
    Ok(())
}

/// Validate a per-tick probability; NaN slips past `range` checks
pub fn validate_probability(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Probability must be finite");
    }
    if !(0.0..=1.0).contains(&value) {
        return Err("Probability must be between 0 and 1");
    }
    Ok(())
}

/// Schema-level check used by `SimulationConfig`'s `Validate` derive
pub fn validate_metric_ranges(config: &SimulationConfig) -> Result<(), ValidationError> {
    if let Err(message) = validate_probability(config.alert_chance) {
        let mut error = ValidationError::new("alert_chance");
        error.message = Some(Cow::Borrowed(message));
        return Err(error);
    }

    for metric in Metric::ALL {
        let walk = config.ranges.get(metric);
        let initial = config.initial.get(metric);

        let result = validate_walk_range(walk)
            .and_then(|_| validate_initial_bounds(initial, walk));

        if let Err(message) = result {
            let mut error = ValidationError::new("metric_range");
            error.message = Some(Cow::Borrowed(message));
            error.add_param(Cow::Borrowed("metric"), &metric.to_string());
            return Err(error);
        }
    }
    Ok(())
}

/// Run all configuration checks
pub fn validate_simulation_config(config: &SimulationConfig) -> Result<(), SimulationError> {
    config.validate()?;
    Ok(())
}
