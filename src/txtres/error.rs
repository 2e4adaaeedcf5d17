//! Custom error types for the txtres-editor crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum TxtResError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// Reading the next field would extend past end of file.
    ///
    /// The record stream declares no record count, so this is the expected
    /// termination of the record loop: everything from the last fully
    /// decoded record to end of file is the footer. Callers check
    /// [`TxtResError::is_end_of_records`] to tell this apart from real
    /// corruption.
    #[error("read of {requested} bytes at offset {offset} extends past end of file ({file_size} bytes)")]
    EndOfRecords {
        offset: u64,
        requested: u64,
        file_size: u64,
    },

    /// The input is structurally impossible in a way that is not the
    /// expected end-of-records condition (e.g. a short read inside the
    /// declared file size).
    #[error("truncated or corrupt input: {0}")]
    TruncatedOrCorrupt(String),

    /// A hex-encoded cell (header/footer blob or variant tag) failed to decode.
    #[error("invalid hex in {context}: {source}")]
    InvalidHex {
        context: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// A variant type tag did not decode to exactly 8 bytes.
    #[error("variant tag for key {key:?} decodes to {got} bytes, expected 8")]
    BadVariantTag { key: String, got: usize },

    /// A populated variant slot follows an empty one in an imported row.
    /// Gaps are rejected, never silently closed up.
    #[error("variant slot {slot} of key {key:?} is populated but an earlier slot is empty")]
    VariantGap { key: String, slot: usize },

    /// The imported table is missing the reserved header or footer row.
    #[error("imported table has no {0} sentinel row")]
    MissingSentinelRow(&'static str),

    /// The imported table is missing a required column.
    #[error("imported table has no {0:?} column")]
    MissingColumn(String),

    /// The translation selection policy string could not be parsed.
    #[error("invalid selection policy {0:?}: expected '+'-separated 1-based column indices like \"1\" or \"1+2\"")]
    InvalidPolicy(String),

    /// An error from the CSV collaborator.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TxtResError {
    /// Whether this error is the expected record-loop termination rather
    /// than a failure.
    pub fn is_end_of_records(&self) -> bool {
        matches!(self, TxtResError::EndOfRecords { .. })
    }
}

/// A convenience `Result` type alias using the crate's `TxtResError` type.
pub type Result<T> = std::result::Result<T, TxtResError>;
