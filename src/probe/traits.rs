//! Core probe traits and types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Rendering of [`ProbeOutcome::Failed`] in logs and the spreadsheet.
pub const FAILED_LABEL: &str = "failed";

/// Prefix of [`ProbeOutcome::Error`] in logs and the spreadsheet.
pub const ERROR_PREFIX: &str = "Error: ";

/// Result of a single probe.
///
/// A probe never fails as a Rust error: an unreachable or unknown host is a
/// valid observation and is recorded as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum ProbeOutcome {
    /// Round-trip time in milliseconds, rounded to two decimals.
    Latency(f64),
    /// No reply within the timeout.
    Failed,
    /// The probe could not be performed (e.g. name resolution failed).
    Error(String),
}

impl ProbeOutcome {
    /// Build a latency outcome from a measured round-trip time.
    pub fn from_rtt(rtt: Duration) -> Self {
        Self::Latency(round_latency_ms(rtt))
    }

    /// Whether the host answered.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Latency(_))
    }

    /// Latency in milliseconds, if the host answered.
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Self::Latency(ms) => Some(*ms),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latency(ms) => write!(f, "{:?}", ms),
            Self::Failed => f.write_str(FAILED_LABEL),
            Self::Error(msg) => write!(f, "{}{}", ERROR_PREFIX, msg),
        }
    }
}

/// Convert a duration to milliseconds with two decimals.
pub fn round_latency_ms(rtt: Duration) -> f64 {
    // nanoseconds -> hundredths of a millisecond
    (rtt.as_nanos() as f64 / 10_000.0).round() / 100.0
}

/// Core probe trait.
///
/// Implementations issue exactly one check per call and never retry.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    /// Probe `host` once.
    async fn probe(&self, host: &str) -> ProbeOutcome;
}
