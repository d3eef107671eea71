//! Error types for notepack.

/// Errors that can occur while preparing a record collection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The source must be scanned twice to fix partition boundaries, and
    /// the second scan could not be opened.
    #[error("source is not replayable: {path} ({reason})")]
    SourceNotReplayable {
        /// Path of the source that failed to reopen.
        path: String,
        /// Underlying reason, usually an I/O message.
        reason: String,
    },

    /// A required column is absent from the source header.
    #[error("schema error: required column '{column}' not found in header")]
    SchemaError {
        /// Name of the missing column.
        column: String,
    },

    /// The external segmenter failed on one record's text.
    ///
    /// Recovered per record by the pipeline: the record is excluded and the
    /// run continues.
    #[error("segmentation failed for record '{record_id}': {reason}")]
    Segmentation {
        /// Identifier of the record that could not be segmented.
        record_id: String,
        /// Failure description from the segmenter.
        reason: String,
    },

    /// Invalid token ceiling (must be > 0).
    #[error("invalid token ceiling: {0} (must be > 0)")]
    InvalidTokenCeiling(usize),

    /// Invalid partition count (must be >= 1).
    #[error("invalid partition count: {0} (must be >= 1)")]
    InvalidPartitionCount(usize),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for notepack operations.
pub type Result<T> = std::result::Result<T, Error>;
