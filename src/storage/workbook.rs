//! Spreadsheet-backed result log.
//!
//! Reads the first worksheet with `calamine` and rewrites the whole file with
//! `rust_xlsxwriter`. The first row is always the header.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::error::LogError;
use super::types::{AppendSummary, COLUMNS, ProbeRecord};
use crate::probe::{ERROR_PREFIX, FAILED_LABEL, ProbeOutcome};

/// Column widths for timestamp, host and outcome.
const COLUMN_WIDTHS: [f64; 3] = [20.0, 18.0, 20.0];

/// Result log bound to a spreadsheet path.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    /// Create a log handle. Nothing is read or written until asked.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Spreadsheet location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every data row of the existing spreadsheet.
    ///
    /// # Errors
    /// - `LogError::Missing` if the file does not exist
    /// - `LogError::Unreadable` if it exists but cannot be parsed
    pub fn read_existing(&self) -> Result<Vec<ProbeRecord>, LogError> {
        match std::fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LogError::Missing {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(self.unreadable(e)),
        }

        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| self.unreadable(e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| self.unreadable("workbook has no worksheets"))?
            .map_err(|e| self.unreadable(e))?;

        let records = range
            .rows()
            .skip(1)
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(record_from_row)
            .collect();

        Ok(records)
    }

    /// Append a run's records, rewriting the whole file.
    ///
    /// An absent file starts an empty table. An unreadable one is moved aside
    /// to `<name>.unreadable-<timestamp>` and the run continues as if the
    /// file were absent.
    ///
    /// # Errors
    /// Returns `LogError::Write` if the spreadsheet cannot be saved.
    pub fn append(&self, records: &[ProbeRecord]) -> Result<AppendSummary, LogError> {
        let existing = match self.read_existing() {
            Ok(rows) => rows,
            Err(LogError::Missing { .. }) => {
                tracing::debug!(path = %self.path.display(), "Creating new result log");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Existing result log ignored");
                self.set_aside();
                Vec::new()
            }
        };

        let previous_rows = existing.len();
        let mut rows = existing;
        rows.extend_from_slice(records);

        self.write_all(&rows).map_err(|source| LogError::Write {
            path: self.path.clone(),
            source,
        })?;

        let summary = AppendSummary {
            previous_rows,
            new_rows: records.len(),
            total_rows: rows.len(),
        };
        tracing::info!(
            path = %self.path.display(),
            previous = summary.previous_rows,
            added = summary.new_rows,
            total = summary.total_rows,
            "Results saved"
        );
        Ok(summary)
    }

    fn write_all(&self, rows: &[ProbeRecord]) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header = Format::new().set_bold();

        for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *name, &header)?;
            worksheet.set_column_width(col, width)?;
        }

        for (idx, record) in rows.iter().enumerate() {
            write_record(worksheet, idx as u32 + 1, record)?;
        }

        workbook.save(&self.path)
    }

    /// Move an unreadable file out of the way so the rewrite does not destroy it.
    ///
    /// Only regular files are moved. An existing backup is never replaced.
    fn set_aside(&self) {
        if !std::fs::metadata(&self.path).is_ok_and(|m| m.is_file()) {
            tracing::warn!(
                path = %self.path.display(),
                "Result log path is not a regular file, leaving it in place"
            );
            return;
        }

        let mut base = self.path.clone().into_os_string();
        base.push(format!(".unreadable-{}", Local::now().format("%Y%m%d%H%M%S")));

        let mut backup = PathBuf::from(&base);
        let mut n = 1u32;
        while backup.exists() {
            let mut name = base.clone();
            name.push(format!("-{n}"));
            backup = PathBuf::from(name);
            n += 1;
        }

        match std::fs::rename(&self.path, &backup) {
            Ok(()) => tracing::warn!(
                backup = %backup.display(),
                "Unreadable result log moved aside"
            ),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to move unreadable result log aside, it will be overwritten"
            ),
        }
    }

    fn unreadable(&self, details: impl std::fmt::Display) -> LogError {
        LogError::Unreadable {
            path: self.path.clone(),
            details: details.to_string(),
        }
    }
}

fn write_record(worksheet: &mut Worksheet, row: u32, record: &ProbeRecord) -> Result<(), XlsxError> {
    worksheet.write_string(row, 0, &record.timestamp)?;
    worksheet.write_string(row, 1, &record.host)?;
    match &record.outcome {
        ProbeOutcome::Latency(ms) => worksheet.write_number(row, 2, *ms)?,
        other => worksheet.write_string(row, 2, other.to_string())?,
    };
    Ok(())
}

fn record_from_row(row: &[Data]) -> ProbeRecord {
    let cell = |idx: usize| row.get(idx).unwrap_or(&Data::Empty);
    ProbeRecord::new(
        text_cell(cell(0)),
        text_cell(cell(1)),
        outcome_cell(cell(2)),
    )
}

fn text_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn outcome_cell(cell: &Data) -> ProbeOutcome {
    match cell {
        Data::Float(ms) => ProbeOutcome::Latency(*ms),
        Data::Int(ms) => ProbeOutcome::Latency(*ms as f64),
        Data::String(s) if s == FAILED_LABEL => ProbeOutcome::Failed,
        Data::String(s) => ProbeOutcome::Error(s.strip_prefix(ERROR_PREFIX).unwrap_or(s).to_string()),
        Data::Empty => ProbeOutcome::Error(String::new()),
        other => ProbeOutcome::Error(other.to_string()),
    }
}
