//! The comparison scale factor.
//!
//! A single persistent multiplier applied to the second slot's series for
//! display and correlation. Starts at 1.0 and only moves through the three
//! explicit transitions: halve, double, reset. Halving has no floor — the
//! value approaches but never reaches zero — and doubling has no ceiling,
//! so the factor stays strictly positive for the session's lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor(f64);

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

impl ScaleFactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn halve(&mut self) {
        self.0 *= 0.5;
    }

    pub fn double(&mut self) {
        self.0 *= 2.0;
    }

    pub fn reset(&mut self) {
        self.0 = 1.0;
    }

    pub fn is_default(self) -> bool {
        self.0 == 1.0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_one() {
        assert_eq!(ScaleFactor::new().value(), 1.0);
        assert!(ScaleFactor::new().is_default());
    }

    #[test]
    fn halve_then_double_round_trips() {
        let mut scale = ScaleFactor::new();
        scale.halve();
        assert_eq!(scale.value(), 0.5);
        scale.double();
        assert_eq!(scale.value(), 1.0);
    }

    #[test]
    fn reset_from_any_state() {
        let mut scale = ScaleFactor::new();
        for _ in 0..7 {
            scale.double();
        }
        scale.reset();
        assert_eq!(scale.value(), 1.0);
    }

    #[test]
    fn repeated_halving_stays_positive() {
        let mut scale = ScaleFactor::new();
        for _ in 0..200 {
            scale.halve();
        }
        assert!(scale.value() > 0.0);
    }

    #[test]
    fn display_format() {
        let mut scale = ScaleFactor::new();
        scale.halve();
        assert_eq!(scale.to_string(), "0.50x");
    }
}
