//! Night Owls campaign runner.
//!
//! A [`CampaignSession`] wraps a ledger store and exposes every player
//! operation: previewing, queueing and resolving missions, heat
//! adjustments, and complication spins. It reads heat once per operation
//! and hands the same reading to scoring and to option-table selection.

pub mod config;
pub mod error;
pub mod session;

pub use config::CampaignConfig;
pub use error::{CampaignError, CampaignResult};
pub use session::{CampaignSession, QueuedMission, parse_mission};
