//! Probe layer.
//!
//! One reachability and latency check per host, bounded by a timeout.
//!
//! - [`Prober`]: Core trait for implementing probes
//! - [`ProbeOutcome`]: Latency, no reply, or probe error
//! - [`IcmpProber`]: ICMP echo probe

mod icmp;
mod traits;

pub use icmp::IcmpProber;
pub use traits::{ERROR_PREFIX, FAILED_LABEL, ProbeOutcome, Prober, round_latency_ms};
