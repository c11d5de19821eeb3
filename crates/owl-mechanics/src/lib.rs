//! Mission scoring and progression for Night Owls.
//!
//! Converts mission choices into Renown and Notoriety deltas, bands the
//! current Notoriety into heat, and folds the ledger into running totals
//! and tiers. Everything here is pure: no I/O, no clocks, no randomness.

pub mod adjustment;
pub mod heat;
pub mod meter;
pub mod mission;
pub mod progression;
pub mod scoring;
pub mod tier;

pub use adjustment::Adjustment;
pub use heat::{HeatBand, HeatBanding, HeatReading};
pub use meter::Meter;
pub use mission::{Archetype, Execution, Magnitude, MissionInputs, OpsFlags};
pub use progression::{ProgressionTotals, Standing, recompute, replay};
pub use scoring::{MissionScore, ScoringPolicy, SteppedPolicy, score_mission};
pub use tier::{NextTier, Perk, TierLadder};
