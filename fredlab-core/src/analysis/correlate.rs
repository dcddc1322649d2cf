//! Scale, align, and correlate two series.
//!
//! The one computation this workbench owns: apply the comparison scale to
//! the second series, inner-join on date, and compute the Pearson
//! coefficient over the surviving rows. Pure functions, no side effects.

use super::align::{align_pair, AlignedPair};
use crate::domain::TimeSeries;
use thiserror::Error;

/// Correlation could not be computed. Reported, never fatal — the caller
/// skips the readout and still renders whatever series data it has.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorrelationError {
    #[error("only {0} overlapping data point(s) — need at least 2 to correlate")]
    TooFewPoints(usize),

    #[error("aligned values have zero variance — correlation undefined")]
    ZeroVariance,
}

/// A computed coefficient plus the number of rows it was computed over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationResult {
    /// Pearson coefficient, always within [-1, 1].
    pub coefficient: f64,
    /// Aligned rows that contributed.
    pub aligned_points: usize,
}

/// Scale `series2` by `scale`, align both series on shared non-missing
/// dates, and compute the Pearson correlation over the aligned pairs.
///
/// Scaling happens before alignment, and zero is a value rather than a
/// gap, so the scale never changes which rows are dropped. The
/// coefficient is computed on the scaled values — it matches exactly what
/// a chart of the scaled series shows.
pub fn align_and_correlate(
    series1: &TimeSeries,
    series2: &TimeSeries,
    scale: f64,
) -> Result<CorrelationResult, CorrelationError> {
    let scaled = series2.scaled(scale);
    let aligned = align_pair(series1, &scaled);
    correlate_aligned(&aligned)
}

/// Pearson coefficient over an already-aligned pair.
pub fn correlate_aligned(aligned: &AlignedPair) -> Result<CorrelationResult, CorrelationError> {
    if aligned.len() < 2 {
        return Err(CorrelationError::TooFewPoints(aligned.len()));
    }

    // Pearson is undefined when either side is constant. Checked exactly,
    // up front, so the division below never sees a zero denominator.
    let first = aligned.rows[0];
    let constant1 = aligned.rows.iter().all(|r| r.value1 == first.value1);
    let constant2 = aligned.rows.iter().all(|r| r.value2 == first.value2);
    if constant1 || constant2 {
        return Err(CorrelationError::ZeroVariance);
    }

    let n = aligned.len() as f64;
    let mean1 = aligned.rows.iter().map(|r| r.value1).sum::<f64>() / n;
    let mean2 = aligned.rows.iter().map(|r| r.value2).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var1 = 0.0;
    let mut var2 = 0.0;
    for row in &aligned.rows {
        let d1 = row.value1 - mean1;
        let d2 = row.value2 - mean2;
        cov += d1 * d2;
        var1 += d1 * d1;
        var2 += d2 * d2;
    }

    // Rounding in the accumulation can push the ratio a hair outside [-1, 1].
    let coefficient = (cov / (var1 * var2).sqrt()).clamp(-1.0, 1.0);

    Ok(CorrelationResult {
        coefficient,
        aligned_points: aligned.len(),
    })
}
