//! Session state threaded through the interaction handlers.
//!
//! Both front-ends hold exactly one of these and pass it into every
//! handler — no globals. A slot's selection is replaced wholesale when
//! the user picks a new series; the scale factor persists across
//! repeated comparisons and only moves through its three transitions,
//! which are gated on both slots being filled.

use crate::domain::{DateRange, ScaleFactor, SeriesSelection};
use serde::{Deserialize, Serialize};

/// The two comparison slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn label(self) -> &'static str {
        match self {
            Slot::First => "Indicator 1",
            Slot::Second => "Indicator 2",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    slot1: Option<SeriesSelection>,
    slot2: Option<SeriesSelection>,
    pub scale: ScaleFactor,
    pub range: DateRange,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a slot's selection wholesale.
    pub fn select(&mut self, slot: Slot, selection: SeriesSelection) {
        match slot {
            Slot::First => self.slot1 = Some(selection),
            Slot::Second => self.slot2 = Some(selection),
        }
    }

    pub fn selection(&self, slot: Slot) -> Option<&SeriesSelection> {
        match slot {
            Slot::First => self.slot1.as_ref(),
            Slot::Second => self.slot2.as_ref(),
        }
    }

    pub fn both_selected(&self) -> bool {
        self.slot1.is_some() && self.slot2.is_some()
    }

    /// Scale adjustment is only offered once both slots are filled.
    pub fn scale_adjust_enabled(&self) -> bool {
        self.both_selected()
    }

    /// Returns true if the transition was applied.
    pub fn halve_scale(&mut self) -> bool {
        if !self.scale_adjust_enabled() {
            return false;
        }
        self.scale.halve();
        true
    }

    /// Returns true if the transition was applied.
    pub fn double_scale(&mut self) -> bool {
        if !self.scale_adjust_enabled() {
            return false;
        }
        self.scale.double();
        true
    }

    /// Returns true if the transition was applied.
    pub fn reset_scale(&mut self) -> bool {
        if !self.scale_adjust_enabled() {
            return false;
        }
        self.scale.reset();
        true
    }
}
