//! CSV export of fetched series.
//!
//! Two shapes: the series at full resolution, and a quarterly view
//! sampled at quarter-start dates from a fixed anchor through today.
//! Missing values export as empty fields in both.

use crate::domain::TimeSeries;
use chrono::{Datelike, NaiveDate};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// First date eligible for the quarterly view. Quarter starts before this
/// anchor are excluded, so the earliest exported row is 2013-04-01.
pub fn quarterly_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2013, 1, 5).unwrap()
}

/// Write the full series as `date,value` rows.
pub fn export_series_csv(series: &TimeSeries, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "value"])?;

    for obs in &series.observations {
        writer.write_record([
            obs.date.to_string(),
            obs.value.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the series sampled at quarter-start dates through `today`.
///
/// Rows carry the value observed exactly on the quarter start, or an
/// empty field when there is none — a reindex, not an aggregation.
pub fn export_series_quarterly_csv(
    series: &TimeSeries,
    path: &Path,
    today: NaiveDate,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["date", "value"])?;

    for date in quarter_starts(quarterly_anchor(), today) {
        writer.write_record([
            date.to_string(),
            series
                .value_on(date)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Quarter-start dates (Jan/Apr/Jul/Oct 1) within `[from, through]`.
fn quarter_starts(from: NaiveDate, through: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for year in from.year()..=through.year() {
        for month in [1, 4, 7, 10] {
            let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            if date >= from && date <= through {
                dates.push(date);
            }
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn quarter_starts_respect_the_anchor() {
        let starts = quarter_starts(quarterly_anchor(), d("2014-01-01"));
        assert_eq!(
            starts,
            vec![
                d("2013-04-01"),
                d("2013-07-01"),
                d("2013-10-01"),
                d("2014-01-01"),
            ]
        );
    }

    #[test]
    fn full_export_writes_missing_as_empty() {
        let series = TimeSeries::new(
            "UNRATE",
            vec![
                Observation::new(d("2024-01-01"), Some(3.7)),
                Observation::new(d("2024-02-01"), None),
            ],
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unrate.csv");
        export_series_csv(&series, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "date,value");
        assert_eq!(lines[1], "2024-01-01,3.7");
        assert_eq!(lines[2], "2024-02-01,");
    }

    #[test]
    fn quarterly_export_samples_exact_dates_only() {
        let series = TimeSeries::new(
            "GDPC1",
            vec![
                Observation::new(d("2013-04-01"), Some(100.0)),
                // 2013-07-01 absent entirely
                Observation::new(d("2013-10-01"), Some(110.0)),
                Observation::new(d("2013-10-15"), Some(999.0)), // off-cadence, ignored
            ],
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gdpc1_quarterly.csv");
        export_series_quarterly_csv(&series, &path, d("2013-12-31")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,value",
                "2013-04-01,100",
                "2013-07-01,",
                "2013-10-01,110",
            ]
        );
    }
}
