//! Ledger model for Night Owls.
//!
//! The ledger is the single source of truth for a player's standing. Every
//! resolved mission, heat adjustment and drawn complication becomes one
//! immutable [`LedgerRecord`]; totals are always derived by folding the
//! records, never stored on their own.

/// Export of the full ledger as CSV, JSON, Markdown or plain text.
pub mod export;
/// Error types used throughout the crate.
pub mod error;
/// JSON-lines file ledger.
pub mod file;
/// Ledger records and their kind-specific payloads.
pub mod record;
/// Saturating parsers for player-entered numbers.
pub mod saturating;
/// The `LedgerStore` boundary and the in-memory store.
pub mod store;
/// Canonical city wards.
pub mod ward;

/// Re-export error types.
pub use error::{LedgerError, LedgerResult};
/// Re-export the file-backed store.
pub use file::JsonLinesLedger;
/// Re-export record types.
pub use record::{
    ComplicationDetail, ExposureBreakdown, LedgerRecord, MissionDetail, RecordDetail, RecordKind,
    format_points,
};
/// Re-export store types.
pub use store::{LedgerStore, MemoryLedger};
