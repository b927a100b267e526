//! Storage-specific error types.
//!
//! All result log operations return [`LogError`] on failure, which can be
//! matched to tell an absent file from an unreadable one or a failed write.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the result log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The spreadsheet does not exist yet.
    #[error("result log not found: {}", path.display())]
    Missing {
        /// Expected location.
        path: PathBuf,
    },

    /// The spreadsheet exists but could not be parsed.
    #[error("result log {} is unreadable: {details}", path.display())]
    Unreadable {
        /// Location of the file.
        path: PathBuf,
        /// Parser or I/O error text.
        details: String,
    },

    /// Writing the spreadsheet failed.
    #[error("failed to write result log {}: {source}", path.display())]
    Write {
        /// Target location.
        path: PathBuf,
        /// Underlying writer error.
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}
