//! pingreport - host latency probe with spreadsheet log and email report
//!
//! Each run probes a fixed list of hosts once, appends the results to an
//! `.xlsx` log and emails that log as an attachment.
//!
//! # Architecture
//!
//! - **Config**: Immutable run configuration, credentials from the environment
//! - **Probe**: ICMP echo probe returning latency, no reply, or an error
//! - **Storage**: Spreadsheet result log, rewritten on every append
//! - **Report**: SMTP-over-TLS delivery of the log file
//! - **Runner**: Sequential probe/log/report pass
//!
//! # Example
//!
//! ```rust,no_run
//! use pingreport::{AppConfig, Runner};
//!
//! # async fn demo() {
//! let config = AppConfig::load();
//! let summary = Runner::from_config(config).run().await;
//! println!("{} of {} hosts reachable", summary.reachable(), summary.records.len());
//! # }
//! ```

pub mod config;
pub mod probe;
pub mod report;
pub mod runner;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use probe::{IcmpProber, ProbeOutcome, Prober};
pub use report::{MailTransport, ReportError, ReportOutcome, Reporter, SmtpMailer};
pub use runner::{RunSummary, Runner};
pub use storage::{LogError, ProbeRecord, ResultLog};
