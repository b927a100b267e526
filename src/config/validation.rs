//! Configuration validation utilities.

use std::net::IpAddr;

use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    /// A host entry cannot be probed.
    #[error("invalid host '{host}': {reason}")]
    InvalidHost {
        /// The rejected entry.
        host: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Outcome of validating the configured host list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedHosts {
    /// Hosts that passed, in their original order.
    pub valid: Vec<String>,
    /// Hosts that were dropped.
    pub rejected: Vec<String>,
}

/// Check that a single host entry looks probeable.
///
/// Accepts dotted hostnames, IP literals and `localhost`.
pub fn validate_host(host: &str) -> Result<(), ConfigError> {
    let reject = |reason| ConfigError::InvalidHost {
        host: host.to_string(),
        reason,
    };

    if host.is_empty() {
        return Err(reject("empty"));
    }
    if host.chars().any(char::is_whitespace) {
        return Err(reject("contains whitespace"));
    }
    if host.parse::<IpAddr>().is_ok() || host.eq_ignore_ascii_case("localhost") {
        return Ok(());
    }
    if !host.contains('.') {
        return Err(reject("not a dotted hostname"));
    }
    Ok(())
}

/// Split a host list into valid and rejected entries.
///
/// The input is left untouched; valid hosts are collected into a new vector.
pub fn validate_hosts<S: AsRef<str>>(hosts: &[S]) -> ValidatedHosts {
    let mut validated = ValidatedHosts::default();

    for host in hosts {
        let host = host.as_ref();
        match validate_host(host) {
            Ok(()) => validated.valid.push(host.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping invalid host");
                validated.rejected.push(host.to_string());
            }
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host_accepts_dotted_names() {
        assert!(validate_host("google.com").is_ok());
        assert!(validate_host("sub.domain.example.org").is_ok());
    }

    #[test]
    fn test_validate_host_accepts_ip_and_localhost() {
        assert!(validate_host("127.0.0.1").is_ok());
        assert!(validate_host("::1").is_ok());
        assert!(validate_host("localhost").is_ok());
    }

    #[test]
    fn test_validate_host_rejects_bad_entries() {
        assert!(validate_host("").is_err());
        assert!(validate_host("nodots").is_err());
        assert!(validate_host("bad host.com").is_err());
    }

    #[test]
    fn test_validate_host_error_message() {
        let err = validate_host("intranet").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid host 'intranet': not a dotted hostname"
        );
    }

    #[test]
    fn test_validate_hosts_keeps_adjacent_entries() {
        // Two invalid entries in a row must both be dropped and the one after
        // them kept.
        let hosts = ["bad1", "bad2", "github.com", "", "zoom.com"];
        let validated = validate_hosts(&hosts);

        assert_eq!(validated.valid, vec!["github.com", "zoom.com"]);
        assert_eq!(validated.rejected, vec!["bad1", "bad2", ""]);
        assert_eq!(hosts.len(), 5);
    }

    #[test]
    fn test_validate_hosts_all_valid() {
        let hosts = vec!["a.com".to_string(), "b.org".to_string()];
        let validated = validate_hosts(&hosts);
        assert_eq!(validated.valid, hosts);
        assert!(validated.rejected.is_empty());
    }
}
