//! ICMP echo probe.
//!
//! Measures round-trip latency to a host with a single echo request.

use std::net::IpAddr;
use std::time::Duration;

use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence, SurgeError};
use tokio::time::error::Elapsed;
use tokio::time::timeout;

use super::traits::{ProbeOutcome, Prober};
use crate::config::DEFAULT_PROBE_TIMEOUT;

/// ICMP echo prober.
///
/// Resolves the host, sends one echo request and waits at most `timeout`
/// for the reply.
#[derive(Debug, Clone)]
pub struct IcmpProber {
    timeout: Duration,
}

impl Default for IcmpProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl IcmpProber {
    /// Create a prober with the given reply timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Reply timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Resolve hostname to IP address.
async fn resolve_host(host: &str) -> Result<IpAddr, std::io::Error> {
    // First, try to parse as an IP address directly
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host(format!("{host}:0")).await?;
    addrs
        .into_iter()
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses found"))
}

#[async_trait::async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, host: &str) -> ProbeOutcome {
        let ip_addr = match resolve_host(host).await {
            Ok(ip) => ip,
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Failed to resolve hostname");
                return ProbeOutcome::Error(e.to_string());
            }
        };

        let client = match ip_addr {
            IpAddr::V4(_) => Client::new(&Config::default()),
            IpAddr::V6(_) => Client::new(&Config::builder().kind(ICMP::V6).build()),
        };

        let client = match client {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(host = %host, error = %e, "Failed to create ICMP client");
                return ProbeOutcome::Error(e.to_string());
            }
        };

        let mut pinger = client.pinger(ip_addr, PingIdentifier(rand::random())).await;
        pinger.timeout(self.timeout);

        let reply = timeout(self.timeout, pinger.ping(PingSequence(0), &[])).await;
        let outcome = outcome_from(reply);
        match &outcome {
            ProbeOutcome::Latency(_) => {
                tracing::debug!(host = %host, ip = %ip_addr, latency = %outcome, "Ping probe successful")
            }
            ProbeOutcome::Failed => tracing::debug!(
                host = %host,
                timeout_ms = self.timeout.as_millis(),
                "Ping probe timed out"
            ),
            ProbeOutcome::Error(e) => tracing::warn!(host = %host, error = %e, "Ping probe failed"),
        }
        outcome
    }
}

/// Classify one echo attempt.
///
/// Both the pinger's own timeout and the outer deadline mean no reply.
fn outcome_from<P>(reply: Result<Result<(P, Duration), SurgeError>, Elapsed>) -> ProbeOutcome {
    match reply {
        Ok(Ok((_, rtt))) => ProbeOutcome::from_rtt(rtt),
        Ok(Err(SurgeError::Timeout { .. })) | Err(_) => ProbeOutcome::Failed,
        Ok(Err(e)) => ProbeOutcome::Error(e.to_string()),
    }
}
