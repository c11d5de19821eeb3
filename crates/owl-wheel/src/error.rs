//! Error types for the complication wheel.

use std::path::PathBuf;

use thiserror::Error;

use owl_core::LedgerError;
use owl_mechanics::HeatBand;

/// Result type for wheel operations.
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors that can occur while loading tables or committing a spin.
#[derive(Debug, Error)]
pub enum WheelError {
    /// The chosen index does not exist in the active table. Usually the
    /// heat band changed between proposal and completion; spin again.
    #[error("spin index {index} is outside the {band} heat table of {count} options; try again")]
    OutOfRangeChoice {
        /// Index the client chose.
        index: usize,
        /// Size of the active table.
        count: usize,
        /// Band of the active table.
        band: HeatBand,
    },

    /// The spin nonce was empty.
    #[error("spin nonce must not be empty")]
    InvalidNonce,

    /// An option table has no entries.
    #[error("the {0} heat complication table is empty")]
    EmptyTable(HeatBand),

    /// An option table file could not be read or parsed.
    #[error("cannot load complication table {}: {message}", .path.display())]
    TableLoad {
        /// File that failed.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The ledger rejected the append.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
