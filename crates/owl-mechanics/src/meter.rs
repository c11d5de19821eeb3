//! Cumulative meters (Renown, Notoriety).
//!
//! A meter is a running total with a hard floor. Deltas that would take it
//! below the floor are discarded rather than carried over, so a large
//! negative adjustment cannot leave the meter in debt.

use serde::{Deserialize, Serialize};

/// A named running total clamped at a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    /// Display name of the meter.
    pub name: String,
    /// Current value.
    pub current: f64,
    /// Lowest value the meter may hold (usually 0).
    pub floor: f64,
}

impl Meter {
    /// Create a meter starting at zero with a zero floor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current: 0.0,
            floor: 0.0,
        }
    }

    /// Apply a delta, clamping to the floor. Returns the new value.
    ///
    /// Non-finite deltas are ignored.
    pub fn apply(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.current = (self.current + delta).max(self.floor);
        }
        self.current
    }

    /// Returns true if the meter sits at its floor.
    pub fn is_at_floor(&self) -> bool {
        self.current <= self.floor
    }
}

impl std::fmt::Display for Meter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name,
            owl_core::format_points(self.current)
        )
    }
}
