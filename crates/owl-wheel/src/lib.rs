//! The complication wheel.
//!
//! A spin is chosen and animated on the client, then committed here. The
//! [`Reconciler`] validates the client's index against the option table for
//! the current heat band and appends exactly one ledger record per spin
//! nonce, however many times the completion is delivered.

pub mod error;
pub mod options;
pub mod reconciler;
pub mod spin;

pub use error::{WheelError, WheelResult};
pub use options::{BuiltinOptions, DirOptions, OptionSource, OptionTable};
pub use reconciler::{DEFAULT_NONCE_CAPACITY, NonceCache, Reconciler, SpinReceipt};
pub use spin::{MAX_ROTATIONS, MIN_ROTATIONS, SpinProposal, WheelGeometry, propose_spin};
