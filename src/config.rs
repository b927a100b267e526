//! Configuration module.
//!
//! Provides the run configuration:
//! - Probe settings (host list, timeout, inter-probe delay)
//! - Result log settings (spreadsheet path)
//! - SMTP settings (relay, port, credentials from the environment)

mod app;
mod validation;

pub use app::{AppConfig, Credentials, ProbeConfig, SmtpConfig, StorageConfig};
pub use validation::{ConfigError, ValidatedHosts, validate_host, validate_hosts};

// Re-export constants
pub use app::{
    DEFAULT_HOSTS, DEFAULT_OUTPUT_FILE, DEFAULT_PROBE_DELAY, DEFAULT_PROBE_TIMEOUT,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT, DEFAULT_SMTP_TIMEOUT, EMAIL_PASS_VAR, EMAIL_USER_VAR,
};
