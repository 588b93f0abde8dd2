//! Error types for the undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a parse.
///
/// Problems that only affect enrichment (a broken image, an empty document)
/// are not errors; they are reported through
/// [`DocxParseResult::warnings`](crate::DocxParseResult::warnings).
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not a ZIP archive, holds no entries, or lacks the main
    /// document part.
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry's DEFLATE stream could not be inflated.
    #[error("Failed to decompress {entry}: {reason}")]
    DecompressionFailure {
        /// Name of the entry being inflated.
        entry: String,
        /// Description of the underlying inflate error.
        reason: String,
    },

    /// An entry uses a compression method other than Store (0) or Deflate (8).
    #[error("Unsupported compression method {method} for {entry}")]
    UnsupportedCompressionMethod {
        /// Name of the entry.
        entry: String,
        /// Raw method value from the local file header.
        method: u16,
    },

    /// I/O error while reading an input file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file exceeds the configured size limit.
    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Size of the input in bytes.
        size: u64,
        /// Configured maximum in bytes.
        limit: u64,
    },

    /// Error serializing a result to JSON.
    #[error("JSON serialization error: {0}")]
    Json(String),

    /// The background parse task could not be joined.
    #[error("Parse task failed: {0}")]
    Task(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
