//! Error types shared by the reader, parser and writer.

use thiserror::Error;

/// Errors that end a read-parse-render cycle
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The source holds no non-blank line
    #[error("The data file does not contain any data")]
    EmptySource,

    /// A structural violation at any parse step
    #[error("Invalid data format: {0}")]
    MalformedRecord(String),

    /// The source could not be opened, read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TelemetryError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TelemetryError::MalformedRecord(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
