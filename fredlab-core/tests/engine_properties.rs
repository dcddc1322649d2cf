//! Property tests for the comparison engine invariants.
//!
//! Uses proptest to verify:
//! 1. The Pearson coefficient always lands in [-1, 1], never NaN
//! 2. Self-correlation is 1.0; correlation against the negation is -1.0
//! 3. Positive scaling leaves the coefficient unchanged; negative flips it
//! 4. Halve-then-double round-trips the scale factor; reset is exactly 1.0

use chrono::NaiveDate;
use fredlab_core::analysis::align_and_correlate;
use fredlab_core::domain::{Observation, ScaleFactor, TimeSeries};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_values(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0_f64, min_len..40)
}

fn arb_scale_ops() -> impl Strategy<Value = Vec<bool>> {
    // true = halve, false = double
    prop::collection::vec(any::<bool>(), 0..30)
}

/// Daily observations starting from a fixed date.
fn series_from(values: &[f64]) -> TimeSeries {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    TimeSeries::new(
        "TEST",
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Observation::new(base + chrono::Duration::days(i as i64), Some(v)))
            .collect(),
    )
}

fn apply_ops(ops: &[bool]) -> ScaleFactor {
    let mut scale = ScaleFactor::new();
    for &halve in ops {
        if halve {
            scale.halve();
        } else {
            scale.double();
        }
    }
    scale
}

// ── 1. Coefficient bounds ────────────────────────────────────────────

proptest! {
    /// Whatever the inputs, a computed coefficient is finite and in [-1, 1].
    #[test]
    fn coefficient_is_bounded(v1 in arb_values(2), v2 in arb_values(2)) {
        let s1 = series_from(&v1);
        let s2 = series_from(&v2);

        if let Ok(result) = align_and_correlate(&s1, &s2, 1.0) {
            prop_assert!(result.coefficient.is_finite());
            prop_assert!((-1.0..=1.0).contains(&result.coefficient));
        }
    }

    /// A series against itself correlates to exactly 1 (within tolerance).
    #[test]
    fn self_correlation_is_one(values in arb_values(2)) {
        let series = series_from(&values);
        prop_assume!(values.iter().any(|&v| v != values[0]));

        let result = align_and_correlate(&series, &series, 1.0).unwrap();
        prop_assert!((result.coefficient - 1.0).abs() < 1e-9);
    }

    /// A series against its negation correlates to exactly -1.
    #[test]
    fn negation_correlation_is_minus_one(values in arb_values(2)) {
        let series = series_from(&values);
        prop_assume!(values.iter().any(|&v| v != values[0]));

        let negated = series.scaled(-1.0);
        let result = align_and_correlate(&series, &negated, 1.0).unwrap();
        prop_assert!((result.coefficient + 1.0).abs() < 1e-9);
    }
}

// ── 2. Scale invariance ──────────────────────────────────────────────

proptest! {
    /// Scaling the second series by a positive constant does not move the
    /// coefficient; Pearson correlation is scale-invariant.
    #[test]
    fn positive_scale_is_invariant(
        v1 in arb_values(2),
        v2 in arb_values(2),
        scale in 0.001..1000.0_f64,
    ) {
        let s1 = series_from(&v1);
        let s2 = series_from(&v2);

        let base = align_and_correlate(&s1, &s2, 1.0);
        prop_assume!(base.is_ok());

        let scaled = align_and_correlate(&s1, &s2, scale).unwrap();
        prop_assert!((base.unwrap().coefficient - scaled.coefficient).abs() < 1e-8);
    }

    /// A negative scale flips the coefficient's sign and nothing else.
    #[test]
    fn negative_scale_flips_sign(
        v1 in arb_values(2),
        v2 in arb_values(2),
        scale in 0.001..1000.0_f64,
    ) {
        let s1 = series_from(&v1);
        let s2 = series_from(&v2);

        let base = align_and_correlate(&s1, &s2, 1.0);
        prop_assume!(base.is_ok());

        let flipped = align_and_correlate(&s1, &s2, -scale).unwrap();
        prop_assert!((base.unwrap().coefficient + flipped.coefficient).abs() < 1e-8);
    }
}

// ── 3. Scale factor transitions ──────────────────────────────────────

proptest! {
    /// From any reachable scale, halve then double returns to the start.
    #[test]
    fn halve_double_round_trips(ops in arb_scale_ops()) {
        let mut scale = apply_ops(&ops);
        let before = scale.value();

        scale.halve();
        scale.double();

        prop_assert!((scale.value() - before).abs() <= before.abs() * 1e-12);
    }

    /// Reset yields exactly 1.0 regardless of prior transitions.
    #[test]
    fn reset_is_exactly_one(ops in arb_scale_ops()) {
        let mut scale = apply_ops(&ops);
        scale.reset();
        prop_assert_eq!(scale.value(), 1.0);
    }

    /// Every reachable scale stays strictly positive.
    #[test]
    fn scale_stays_positive(ops in arb_scale_ops()) {
        prop_assert!(apply_ops(&ops).value() > 0.0);
    }
}
