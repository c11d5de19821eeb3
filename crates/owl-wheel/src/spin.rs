//! Spin proposals and wheel geometry.
//!
//! The client picks an index uniformly, starts animating toward it at once,
//! and only then reports `(index, nonce)` for commitment. The nonce is a
//! fresh UUID per physical spin so retries of the same spin share it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fewest full turns a spin makes before landing.
pub const MIN_ROTATIONS: u32 = 4;
/// Most full turns a spin makes before landing.
pub const MAX_ROTATIONS: u32 = 6;

/// A locally chosen spin, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinProposal {
    /// Index into the active option table.
    pub chosen_index: usize,
    /// Single-use token for this spin.
    pub nonce: String,
    /// Full turns to animate before landing.
    pub rotations: u32,
}

impl SpinProposal {
    /// Where the wheel should come to rest for this proposal.
    pub fn target_angle(&self, option_count: usize) -> f64 {
        WheelGeometry::new(option_count).target_angle(self.chosen_index, self.rotations)
    }
}

/// Propose a spin over `option_count` options. Returns `None` for an empty
/// wheel.
pub fn propose_spin<R: Rng + ?Sized>(option_count: usize, rng: &mut R) -> Option<SpinProposal> {
    if option_count == 0 {
        return None;
    }
    Some(SpinProposal {
        chosen_index: rng.random_range(0..option_count),
        nonce: Uuid::new_v4().to_string(),
        rotations: rng.random_range(MIN_ROTATIONS..=MAX_ROTATIONS),
    })
}

/// Segment layout of a wheel with `n` equal segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelGeometry {
    segments: usize,
}

impl WheelGeometry {
    /// A wheel with `segments` segments (at least one).
    pub fn new(segments: usize) -> Self {
        Self {
            segments: segments.max(1),
        }
    }

    /// Width of one segment in degrees.
    pub fn segment_degrees(&self) -> f64 {
        360.0 / self.segments as f64
    }

    /// Rotation that lands the middle of segment `index` under the pointer
    /// after `rotations` full turns.
    pub fn target_angle(&self, index: usize, rotations: u32) -> f64 {
        let index = index.min(self.segments - 1);
        rotations as f64 * 360.0 + (index as f64 + 0.5) * self.segment_degrees()
    }

    /// Segment under the pointer at `angle` degrees.
    pub fn segment_at(&self, angle: f64) -> usize {
        let normalized = angle.rem_euclid(360.0);
        ((normalized / self.segment_degrees()) as usize).min(self.segments - 1)
    }
}
