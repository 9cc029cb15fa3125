//! Simulation engine tests
//!
//! Tests for the simulation core including:
//! - Bounded random walk stays inside configured ranges
//! - Status classification tiers
//! - Alert log capacity across many ticks

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::generator::{next_reading, next_value};
use shared::{
    classify_reading, Metric, MetricRange, PlotStatus, SensorReading, SimulationConfig, Simulator,
};
use uuid::Uuid;

fn reading(temperature: f64, humidity: f64, soil_moisture: f64, crop_health: f64) -> SensorReading {
    SensorReading {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        temperature,
        humidity,
        soil_moisture,
        crop_health,
        plot_id: "plot-1".to_string(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Dry soil alone makes a plot critical
    #[test]
    fn test_dry_soil_is_critical() {
        let r = reading(20.0, 60.0, 25.0, 80.0);
        assert_eq!(classify_reading(&r), PlotStatus::Critical);
    }

    /// Low humidity alone makes a plot warn
    #[test]
    fn test_low_humidity_is_warning() {
        let r = reading(20.0, 45.0, 35.0, 80.0);
        assert_eq!(classify_reading(&r), PlotStatus::Warning);
    }

    /// Hot but otherwise fine plots
    #[test]
    fn test_temperature_tiers() {
        assert_eq!(classify_reading(&reading(31.0, 60.0, 50.0, 80.0)), PlotStatus::Warning);
        assert_eq!(classify_reading(&reading(33.0, 60.0, 50.0, 80.0)), PlotStatus::Critical);
        assert_eq!(classify_reading(&reading(29.0, 60.0, 50.0, 80.0)), PlotStatus::Healthy);
    }

    /// A long run keeps at most 100 alerts, newest first
    #[test]
    fn test_alert_log_never_exceeds_capacity() {
        let mut sim = Simulator::with_seed(SimulationConfig::default(), 42).unwrap();
        let start = Utc::now();
        sim.seed_plots_if_empty(start);

        for n in 0..2_000 {
            sim.tick(start + Duration::seconds(5 * n));
            assert!(sim.alerts().len() <= 100);
        }

        let alerts = sim.alerts();
        assert_eq!(alerts.len(), 100);
        assert!(alerts.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    /// Same seed, same run
    #[test]
    fn test_seeded_runs_are_reproducible() {
        let now = Utc::now();
        let run = |seed| {
            let mut sim = Simulator::with_seed(SimulationConfig::default(), seed).unwrap();
            sim.seed_plots_if_empty(now);
            for _ in 0..25 {
                sim.tick(now);
            }
            (
                sim.plots().iter().map(|p| p.last_reading().cloned()).collect::<Vec<_>>(),
                sim.alerts(),
            )
        };
        assert_eq!(run(9), run(9));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for metric values across a wide band
    fn value_strategy() -> impl Strategy<Value = f64> {
        (0i64..=1200i64).prop_map(|n| n as f64 / 10.0) // 0.0 to 120.0
    }

    /// Strategy for random-walk ranges with min < max
    fn range_strategy() -> impl Strategy<Value = MetricRange> {
        (0i64..=500i64, 1i64..=500i64, 0i64..=50i64).prop_map(|(min, width, rate)| {
            let min = min as f64 / 10.0;
            MetricRange::new(min, min + width as f64 / 10.0, rate as f64 / 10.0)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every step stays inside [min, max]
        #[test]
        fn prop_next_value_within_bounds(
            seed in any::<u64>(),
            current in value_strategy(),
            range in range_strategy()
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let v = next_value(&mut rng, current, &range);
            prop_assert!(v >= range.min && v <= range.max);
        }

        /// next_value(50, 20, 80, 1) is within one unit of 50
        #[test]
        fn prop_step_is_bounded_by_rate(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let v = next_value(&mut rng, 50.0, &MetricRange::new(20.0, 80.0, 1.0));
            prop_assert!((49.0..=51.0).contains(&v));
        }

        /// A chain of readings never leaves the configured ranges
        #[test]
        fn prop_reading_chain_within_ranges(seed in any::<u64>(), steps in 1usize..200) {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = SimulationConfig::default();
            let now = Utc::now();
            let mut current = next_reading(&mut rng, "plot-1", None, &config, now);
            for _ in 0..steps {
                current = next_reading(&mut rng, "plot-1", Some(&current), &config, now);
                for metric in Metric::ALL {
                    let range = config.ranges.get(metric);
                    let v = current.value(metric);
                    prop_assert!(v >= range.min && v <= range.max, "{} = {}", metric, v);
                }
            }
        }

        /// Exactly one tier, and critical conditions always win
        #[test]
        fn prop_critical_outranks_warning(
            temperature in value_strategy(),
            humidity in value_strategy(),
            soil_moisture in value_strategy(),
            crop_health in value_strategy()
        ) {
            let r = reading(temperature, humidity, soil_moisture, crop_health);
            let status = classify_reading(&r);

            let critical = soil_moisture < 30.0 || temperature > 32.0 || crop_health < 60.0;
            let warning = soil_moisture < 40.0
                || temperature > 30.0
                || humidity < 50.0
                || crop_health < 70.0;

            let expected = if critical {
                PlotStatus::Critical
            } else if warning {
                PlotStatus::Warning
            } else {
                PlotStatus::Healthy
            };
            prop_assert_eq!(status, expected);
        }

        /// Plot status always reflects the last reading
        #[test]
        fn prop_status_consistent_after_ticks(seed in any::<u64>(), ticks in 1u32..50) {
            let mut sim = Simulator::with_seed(SimulationConfig::default(), seed).unwrap();
            let now = Utc::now();
            sim.seed_plots_if_empty(now);
            for _ in 0..ticks {
                sim.tick(now);
            }
            for plot in sim.plots() {
                let r = plot.last_reading().unwrap();
                prop_assert_eq!(plot.status(), classify_reading(r));
            }
            prop_assert!(sim.alerts().len() <= 100);
        }
    }
}
