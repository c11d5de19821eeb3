//! Error types for a campaign session.

use thiserror::Error;

use owl_core::LedgerError;
use owl_wheel::WheelError;

/// Result type for campaign operations.
pub type CampaignResult<T> = Result<T, CampaignError>;

/// Errors that can occur during a campaign session.
#[derive(Debug, Error)]
pub enum CampaignError {
    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// `resolve` was called with nothing queued.
    #[error("no mission queued; preview one with `mission` and `queue` it first")]
    NoQueuedMission,

    /// Unknown command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Ledger error.
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    /// Complication wheel error.
    #[error("{0}")]
    Wheel(#[from] WheelError),
}
