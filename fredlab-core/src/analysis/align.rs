//! Pairwise time alignment.
//!
//! Given two irregularly-sampled series, keep only the timestamps where
//! BOTH carry a value — an inner join on date with row-wise missing drop,
//! not a union with fill. Rows where either side is missing are gone from
//! the result entirely.

use crate::domain::TimeSeries;
use chrono::NaiveDate;
use std::collections::HashMap;

/// One surviving row: the shared date and both values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub value1: f64,
    pub value2: f64,
}

/// The intersection of two series on common, non-missing dates.
///
/// Invariant: `len() <= min(series1.non_missing_len(), series2.non_missing_len())`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    /// Rows sorted ascending by date.
    pub rows: Vec<AlignedRow>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Inner-join two series on date, dropping rows where either value is missing.
pub fn align_pair(series1: &TimeSeries, series2: &TimeSeries) -> AlignedPair {
    // Lookup for the second series: date → value (non-missing only).
    let mut lookup: HashMap<NaiveDate, f64> = HashMap::with_capacity(series2.len());
    for obs in &series2.observations {
        if let Some(value) = obs.value {
            lookup.insert(obs.date, value);
        }
    }

    // Walk the first series in date order; it is already sorted.
    let rows = series1
        .observations
        .iter()
        .filter_map(|obs| {
            let value1 = obs.value?;
            let value2 = *lookup.get(&obs.date)?;
            Some(AlignedRow {
                date: obs.date,
                value1,
                value2,
            })
        })
        .collect();

    AlignedPair { rows }
}
