//! Single-pass orchestration.
//!
//! A run validates the host list, probes each host in order, appends the
//! results to the log once and sends the report once. Every failure is
//! logged and the run continues; nothing here aborts the process.

use std::time::Duration;

use crate::config::{AppConfig, ValidatedHosts, validate_hosts};
use crate::probe::{IcmpProber, Prober};
use crate::report::{MailTransport, ReportError, ReportOutcome, Reporter, SmtpMailer};
use crate::storage::{AppendSummary, LogError, ProbeRecord, ResultLog};

/// Everything a run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Host validation result.
    pub hosts: ValidatedHosts,
    /// One record per probed host, in probe order.
    pub records: Vec<ProbeRecord>,
    /// Result of appending to the log.
    pub log: Result<AppendSummary, LogError>,
    /// Result of sending the report.
    pub report: Result<ReportOutcome, ReportError>,
}

impl RunSummary {
    /// Number of hosts that answered.
    pub fn reachable(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    /// Whether the log was written and the report was sent or skipped.
    pub fn is_clean(&self) -> bool {
        self.log.is_ok() && self.report.is_ok()
    }
}

/// Runs one probe/log/report pass.
pub struct Runner<P, M> {
    config: AppConfig,
    prober: P,
    log: ResultLog,
    reporter: Reporter<M>,
}

impl<P, M> std::fmt::Debug for Runner<P, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl Runner<IcmpProber, SmtpMailer> {
    /// Runner with the ICMP prober and the SMTP reporter.
    pub fn from_config(config: AppConfig) -> Self {
        let prober = IcmpProber::new(config.probe.timeout);
        let reporter = Reporter::from_config(&config);
        Self::new(config, prober, reporter)
    }
}

impl<P: Prober, M: MailTransport> Runner<P, M> {
    /// Create a runner from explicit parts.
    pub fn new(config: AppConfig, prober: P, reporter: Reporter<M>) -> Self {
        let log = ResultLog::new(&config.storage.path);
        Self {
            config,
            prober,
            log,
            reporter,
        }
    }

    /// Run configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Report sender.
    pub fn reporter(&self) -> &Reporter<M> {
        &self.reporter
    }

    /// Probe each host once, in order, pausing between probes.
    pub async fn probe_all(&self, hosts: &[String]) -> Vec<ProbeRecord> {
        let mut records = Vec::with_capacity(hosts.len());

        for (idx, host) in hosts.iter().enumerate() {
            if idx > 0 {
                pause(self.config.probe.delay).await;
            }

            let timestamp = ProbeRecord::timestamp_now();
            let outcome = self.prober.probe(host).await;
            let record = ProbeRecord::new(timestamp, host.as_str(), outcome);

            println!("{record}");
            tracing::debug!(host = %record.host, outcome = %record.outcome, "Probe complete");
            records.push(record);
        }

        records
    }

    /// Execute one full pass.
    pub async fn run(&self) -> RunSummary {
        let hosts = validate_hosts(&self.config.probe.hosts);
        tracing::info!(
            valid = hosts.valid.len(),
            rejected = hosts.rejected.len(),
            "Starting run"
        );

        let records = self.probe_all(&hosts.valid).await;

        let log = self.log.append(&records);
        if let Err(e) = &log {
            tracing::error!(error = %e, "Error saving file");
        }

        let report = self.reporter.send_report().await;
        if let Err(e) = &report {
            tracing::error!(error = %e, "Report not sent");
        }

        let summary = RunSummary {
            hosts,
            records,
            log,
            report,
        };
        tracing::info!(
            probed = summary.records.len(),
            reachable = summary.reachable(),
            clean = summary.is_clean(),
            "Run finished"
        );
        summary
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use lettre::Message;

    use super::*;
    use crate::probe::ProbeOutcome;

    /// Answers from a fixed table and remembers the call order.
    struct ScriptedProber {
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProber {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Prober for ScriptedProber {
        async fn probe(&self, host: &str) -> ProbeOutcome {
            self.calls.lock().unwrap().push(host.to_string());
            match host {
                "up.example.com" => ProbeOutcome::Latency(10.5),
                "down.example.com" => ProbeOutcome::Failed,
                _ => ProbeOutcome::Error("no addresses found".into()),
            }
        }
    }

    struct CountingTransport {
        sent: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl MailTransport for CountingTransport {
        async fn send(&self, _message: Message) -> Result<(), ReportError> {
            *self.sent.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn test_config(dir: &std::path::Path, hosts: &[&str]) -> AppConfig {
        let mut config = AppConfig::default();
        config.probe.hosts = hosts.iter().map(|h| h.to_string()).collect();
        config.probe.delay = Duration::ZERO;
        config.storage.path = dir.join("ping_log.xlsx");
        config
    }

    fn runner(config: AppConfig) -> Runner<ScriptedProber, CountingTransport> {
        let reporter = Reporter::new(
            &config.storage.path,
            Some("me@example.com".into()),
            CountingTransport {
                sent: Mutex::new(0),
            },
        );
        Runner::new(config, ScriptedProber::new(), reporter)
    }

    #[tokio::test]
    async fn test_run_probes_valid_hosts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(
            dir.path(),
            &["up.example.com", "bad", "worse", "down.example.com", "gone.example.com"],
        );
        let runner = runner(config);

        let summary = runner.run().await;

        assert_eq!(
            *runner.prober.calls.lock().unwrap(),
            vec!["up.example.com", "down.example.com", "gone.example.com"]
        );
        assert_eq!(summary.hosts.rejected, vec!["bad", "worse"]);
        assert_eq!(summary.records.len(), 3);
        assert_eq!(summary.reachable(), 1);
        assert_eq!(summary.records[1].outcome, ProbeOutcome::Failed);
        assert!(summary.is_clean());
        assert_eq!(summary.log.as_ref().unwrap().total_rows, 3);
        assert_eq!(*summary.report.as_ref().unwrap(), ReportOutcome::Sent);
        assert_eq!(*runner.reporter_sent(), 1);
    }

    #[tokio::test]
    async fn test_run_continues_after_log_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path(), &["up.example.com"]);
        config.storage.path = dir.path().join("missing-dir").join("ping_log.xlsx");
        let runner = runner(config);

        let summary = runner.run().await;

        assert!(matches!(summary.log, Err(LogError::Write { .. })));
        // Nothing was written, so the report is skipped rather than failing.
        assert_eq!(*summary.report.as_ref().unwrap(), ReportOutcome::Skipped);
        assert_eq!(*runner.reporter_sent(), 0);
    }

    #[tokio::test]
    async fn test_probe_all_with_no_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let runner = runner(test_config(dir.path(), &[]));
        assert!(runner.probe_all(&[]).await.is_empty());
    }

    impl Runner<ScriptedProber, CountingTransport> {
        fn reporter_sent(&self) -> std::sync::MutexGuard<'_, usize> {
            self.reporter().transport().sent.lock().unwrap()
        }
    }
}
