/// Alias for `Result<T, LedgerError>`.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised at the ledger storage boundary.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The backing store could not be read or written.
    #[error("ledger unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    /// A stored record could not be decoded.
    #[error("corrupt ledger record at line {line}: {message}")]
    Corrupt {
        /// One-based line number of the bad record.
        line: usize,
        /// Decoder message.
        message: String,
    },

    /// A record could not be encoded for storage or export.
    #[error("failed to encode ledger record: {0}")]
    Encode(#[from] serde_json::Error),
}
