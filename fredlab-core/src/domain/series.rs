//! Time series, observations, and selection types.
//!
//! FRED marks gaps explicitly (an observation with value `"."`), so missing
//! values are `Option<f64>` rather than NaN sentinels. Dates are strictly
//! increasing after construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated observation. `value` is `None` where the provider
/// reported the period as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// An ordered series of observations for one provider series id.
///
/// Construction sorts by date and drops duplicate dates (first wins), so
/// every `TimeSeries` satisfies the strictly-increasing-dates invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub id: String,
    pub observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(id: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self {
            id: id.into(),
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of observations that carry a value.
    pub fn non_missing_len(&self) -> usize {
        self.observations.iter().filter(|o| o.value.is_some()).count()
    }

    /// Value at an exact date, if present and non-missing.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .and_then(|i| self.observations[i].value)
    }

    /// A copy with every present value multiplied by `factor`.
    ///
    /// Missing stays missing; a factor of zero produces real zeros, so
    /// scaling never changes which rows later survive alignment.
    pub fn scaled(&self, factor: f64) -> TimeSeries {
        TimeSeries {
            id: self.id.clone(),
            observations: self
                .observations
                .iter()
                .map(|o| Observation::new(o.date, o.value.map(|v| v * factor)))
                .collect(),
        }
    }

    /// The last `n` observations (fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(n);
        &self.observations[start..]
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}

/// Requested observation window. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Shell-edge validation: end must not precede start, and neither
    /// bound may lie in the future.
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(format!("end date {end} is before start date {start}"));
            }
        }
        for bound in [self.start, self.end].into_iter().flatten() {
            if bound > today {
                return Err(format!("date {bound} is in the future"));
            }
        }
        Ok(())
    }
}

/// The series a slot currently points at. Replaced wholesale when the
/// user picks a new series — never partially mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSelection {
    pub id: String,
    pub title: String,
    pub range: DateRange,
}

impl SeriesSelection {
    pub fn new(id: impl Into<String>, title: impl Into<String>, range: DateRange) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn construction_sorts_and_dedupes() {
        let series = TimeSeries::new(
            "UNRATE",
            vec![
                Observation::new(d("2024-03-01"), Some(3.9)),
                Observation::new(d("2024-01-01"), Some(3.7)),
                Observation::new(d("2024-03-01"), Some(99.0)), // dup, dropped
                Observation::new(d("2024-02-01"), None),
            ],
        );

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), Some(d("2024-01-01")));
        assert_eq!(series.last_date(), Some(d("2024-03-01")));
        assert_eq!(series.value_on(d("2024-03-01")), Some(3.9));
        assert_eq!(series.non_missing_len(), 2);
    }

    #[test]
    fn value_on_misses_missing_and_absent_dates() {
        let series = TimeSeries::new(
            "UNRATE",
            vec![
                Observation::new(d("2024-01-01"), Some(3.7)),
                Observation::new(d("2024-02-01"), None),
            ],
        );

        assert_eq!(series.value_on(d("2024-01-01")), Some(3.7));
        assert_eq!(series.value_on(d("2024-02-01")), None);
        assert_eq!(series.value_on(d("2024-06-01")), None);
    }

    #[test]
    fn scaling_by_zero_keeps_rows() {
        let series = TimeSeries::new(
            "GDPC1",
            vec![
                Observation::new(d("2024-01-01"), Some(2.5)),
                Observation::new(d("2024-04-01"), None),
            ],
        );

        let scaled = series.scaled(0.0);
        assert_eq!(scaled.value_on(d("2024-01-01")), Some(0.0));
        assert_eq!(scaled.non_missing_len(), 1);
    }

    #[test]
    fn tail_clamps_to_length() {
        let series = TimeSeries::new(
            "HOUST",
            vec![Observation::new(d("2024-01-01"), Some(1.0))],
        );
        assert_eq!(series.tail(5).len(), 1);
    }

    #[test]
    fn range_validation() {
        let today = d("2025-06-30");
        let ok = DateRange::new(Some(d("2024-01-01")), Some(d("2024-12-31")));
        assert!(ok.validate(today).is_ok());

        let inverted = DateRange::new(Some(d("2024-12-31")), Some(d("2024-01-01")));
        assert!(inverted.validate(today).is_err());

        let future = DateRange::new(None, Some(d("2026-01-01")));
        assert!(future.validate(today).is_err());
    }
}
