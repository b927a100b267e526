//! Storage Layer
//!
//! Spreadsheet-backed result log. Each run reads the existing table,
//! appends its rows and rewrites the whole file.
//!
//! # Components
//!
//! - [`ResultLog`]: Read/append operations on the `.xlsx` file
//! - [`ProbeRecord`]: One row of the table
//! - [`LogError`]: Missing, unreadable and write failures

mod error;
mod types;
mod workbook;

pub use error::LogError;
pub use types::{AppendSummary, COLUMNS, ProbeRecord, TIMESTAMP_FORMAT};
pub use workbook::ResultLog;
