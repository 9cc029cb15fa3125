//! Synthetic historical series for the charts page

use chrono::{DateTime, Days, TimeZone, Utc};
use rand::Rng;

use crate::generator::{random_id, round_to_tenth};
use crate::models::SensorReading;
use crate::types::DateRange;

/// Days generated when the caller does not say
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Readings per day, six hours apart starting at midnight UTC
pub const READINGS_PER_DAY: u32 = 4;

/// Longest window a caller may request, ten years
pub const MAX_HISTORY_DAYS: u32 = 3650;

/// Generate `days` days of readings for a plot, oldest first.
///
/// Each series has a shape on top of uniform noise: temperature follows a
/// slow sine, humidity a slow cosine, soil moisture drops every fifth day,
/// and crop health improves over the first ten days back from today.
///
/// `days` is capped at [`MAX_HISTORY_DAYS`].
pub fn historical_data<R: Rng + ?Sized>(
    rng: &mut R,
    plot_id: &str,
    days: u32,
    now: DateTime<Utc>,
) -> Vec<SensorReading> {
    let days = days.min(MAX_HISTORY_DAYS);
    let capacity = days.checked_mul(READINGS_PER_DAY).unwrap_or(0);
    let mut data = Vec::with_capacity(capacity as usize);
    let today = now.date_naive();

    for i in 0..days {
        let Some(day) = today.checked_sub_days(Days::new(u64::from(i))) else {
            break;
        };
        let offset = f64::from(i);

        for j in 0..READINGS_PER_DAY {
            let Some(naive) = day.and_hms_opt(j * 6, 0, 0) else {
                continue;
            };
            let timestamp = Utc.from_utc_datetime(&naive);

            let temperature = 20.0 + rng.gen_range(0.0..15.0) + (offset / 5.0).sin() * 3.0;
            let humidity = 40.0 + rng.gen_range(0.0..50.0) + (offset / 7.0).cos() * 5.0;
            let drop = if i % 5 == 0 { 30.0 } else { 0.0 };
            let soil_moisture = f64::max(20.0, 50.0 + rng.gen_range(0.0..30.0) - drop);
            let crop_health =
                f64::min(100.0, 70.0 + rng.gen_range(0.0..20.0) + offset.min(10.0));

            data.push(SensorReading {
                id: random_id(rng),
                timestamp,
                temperature: round_to_tenth(temperature),
                humidity: round_to_tenth(humidity),
                soil_moisture: round_to_tenth(soil_moisture),
                crop_health: round_to_tenth(crop_health),
                plot_id: plot_id.to_string(),
            });
        }
    }

    data.sort_by_key(|reading| reading.timestamp);
    data
}

/// Keep readings that fall inside `range`
pub fn filter_by_date(readings: &[SensorReading], range: &DateRange) -> Vec<SensorReading> {
    if range.is_unbounded() {
        return readings.to_vec();
    }
    readings
        .iter()
        .filter(|reading| range.contains(&reading.timestamp))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_four_readings_per_day_sorted() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = historical_data(&mut rng, "plot-3", 10, fixed_now());
        assert_eq!(data.len(), 40);
        assert!(data.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(data.iter().all(|r| r.plot_id == "plot-3"));
        assert!(data.iter().all(|r| r.timestamp.hour() % 6 == 0));
        assert_eq!(data.last().unwrap().timestamp.date_naive(), fixed_now().date_naive());
        assert_eq!(
            data.first().unwrap().timestamp.date_naive(),
            NaiveDate::from_ymd_opt(2024, 6, 6).unwrap()
        );
    }

    #[test]
    fn test_series_shapes() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = historical_data(&mut rng, "plot-1", 60, fixed_now());
        for r in &data {
            assert!(r.soil_moisture >= 20.0);
            assert!(r.crop_health <= 100.0 && r.crop_health >= 70.0);
            assert!(r.temperature >= 17.0 && r.temperature <= 38.0);
            assert!(r.humidity >= 35.0 && r.humidity <= 95.0);
        }
        // Day zero always carries the soil moisture drop
        let today: Vec<_> = data
            .iter()
            .filter(|r| r.timestamp.date_naive() == fixed_now().date_naive())
            .collect();
        assert!(today.iter().all(|r| r.soil_moisture <= 50.0));
    }

    #[test]
    fn test_window_is_capped() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = historical_data(&mut rng, "plot-1", u32::MAX, fixed_now());
        assert_eq!(data.len(), (MAX_HISTORY_DAYS * READINGS_PER_DAY) as usize);
    }

    #[test]
    fn test_zero_days_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(historical_data(&mut rng, "plot-1", 0, fixed_now()).is_empty());
    }

    #[test]
    fn test_filter_by_date_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(2);
        let data = historical_data(&mut rng, "plot-1", 10, fixed_now());
        let day = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        let single_day = filter_by_date(&data, &DateRange::new(Some(day), Some(day)));
        assert_eq!(single_day.len(), 4);

        let from = filter_by_date(&data, &DateRange::new(Some(day), None));
        assert_eq!(from.len(), 16);

        let to = filter_by_date(&data, &DateRange::new(None, Some(day)));
        assert_eq!(to.len(), 28);

        assert_eq!(filter_by_date(&data, &DateRange::default()).len(), 40);
    }
}
