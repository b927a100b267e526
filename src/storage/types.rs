//! Core data types for the storage layer.
//!
//! - [`ProbeRecord`]: one row of the result log
//! - [`AppendSummary`]: row counts after a log append

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::probe::ProbeOutcome;

/// Timestamp layout used in the result log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column headers of the result log, in order.
pub const COLUMNS: [&str; 3] = ["Timestamp", "Website", "Response Time (ms)"];

/// A single probe result as stored in the result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeRecord {
    /// Local time the probe started, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Probed host.
    pub host: String,
    /// Probe result.
    pub outcome: ProbeOutcome,
}

impl ProbeRecord {
    /// Create a record with an explicit timestamp.
    pub fn new(timestamp: impl Into<String>, host: impl Into<String>, outcome: ProbeOutcome) -> Self {
        Self {
            timestamp: timestamp.into(),
            host: host.into(),
            outcome,
        }
    }

    /// Current local time in the log's timestamp layout.
    pub fn timestamp_now() -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

impl std::fmt::Display for ProbeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {} | {} ms", self.timestamp, self.host, self.outcome)
    }
}

/// Row counts reported by a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AppendSummary {
    /// Rows carried over from the existing file.
    pub previous_rows: usize,
    /// Rows added by this run.
    pub new_rows: usize,
    /// Rows now in the file.
    pub total_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display_matches_console_line() {
        let record = ProbeRecord::new(
            "2025-01-02 03:04:05",
            "github.com",
            ProbeOutcome::Latency(18.2),
        );
        assert_eq!(record.to_string(), "2025-01-02 03:04:05 | github.com | 18.2 ms");
    }

    #[test]
    fn test_timestamp_now_layout() {
        let ts = ProbeRecord::timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(ts.len(), 19);
    }
}
