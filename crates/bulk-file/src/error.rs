//! Error types for bulk-file writing.

use thiserror::Error;

/// Errors that can occur while writing a bulk file.
#[derive(Error, Debug)]
pub enum BulkFileError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
