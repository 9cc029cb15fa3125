//! CSV export of historical readings

use chrono::NaiveDate;

use crate::error::{SimulationError, SimulationResult};
use crate::models::SensorReading;
use crate::types::Metric;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render readings as CSV:
/// `Timestamp,Temperature,Humidity,Soil Moisture,Crop Health`, then one row
/// per reading with values to one decimal. Rows are newline-separated with no
/// trailing newline.
pub fn history_to_csv(readings: &[SensorReading]) -> SimulationResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["Timestamp"];
    header.extend(Metric::ALL.iter().map(|m| m.label()));
    wtr.write_record(&header)?;

    for reading in readings {
        let mut row = vec![reading.timestamp.format(TIMESTAMP_FORMAT).to_string()];
        row.extend(
            Metric::ALL
                .iter()
                .map(|&metric| format!("{:.1}", reading.value(metric))),
        );
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SimulationError::Export(format!("CSV writer error: {}", e)))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| SimulationError::Export(format!("UTF-8 conversion error: {}", e)))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Download name for a plot's export, e.g. `plot-data-plot-1-2024-06-15.csv`
pub fn export_filename(plot_id: &str, date: NaiveDate) -> String {
    format!("plot-data-{}-{}.csv", plot_id, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_csv_header_and_rows() {
        let readings = vec![SensorReading {
            id: Uuid::nil(),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 6, 0, 0).unwrap(),
            temperature: 24.0,
            humidity: 61.26,
            soil_moisture: 45.5,
            crop_health: 88.0,
            plot_id: "plot-1".to_string(),
        }];

        let csv = history_to_csv(&readings).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Timestamp,Temperature,Humidity,Soil Moisture,Crop Health");
        assert_eq!(lines[1], "2024-06-15 06:00:00,24.0,61.3,45.5,88.0");
        assert_eq!(lines.len(), 2);
        assert_eq!(
            csv,
            "Timestamp,Temperature,Humidity,Soil Moisture,Crop Health\n\
             2024-06-15 06:00:00,24.0,61.3,45.5,88.0"
        );
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let csv = history_to_csv(&[]).unwrap();
        assert_eq!(csv, "Timestamp,Temperature,Humidity,Soil Moisture,Crop Health");
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(export_filename("plot-2", date), "plot-data-plot-2-2024-06-15.csv");
    }
}
