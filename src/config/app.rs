//! Application configuration structures.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::validation::ConfigError;

// =============================================================================
// Constants
// =============================================================================

/// Hosts probed on every run.
pub const DEFAULT_HOSTS: &[&str] = &[
    "google.com",
    "amazon.com",
    "github.com",
    "openai.com",
    "youtube.com",
    "wikipedia.com",
    "linkedin.com",
    "zoom.com",
];

/// Probe timeout (2 seconds).
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Pause between consecutive probes (500 milliseconds).
pub const DEFAULT_PROBE_DELAY: Duration = Duration::from_millis(500);

/// Spreadsheet the results are appended to.
pub const DEFAULT_OUTPUT_FILE: &str = "ping_log.xlsx";

/// SMTP relay used for the report.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Implicit-TLS submission port.
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// SMTP session timeout (30 seconds).
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the SMTP login (also the From/To address).
pub const EMAIL_USER_VAR: &str = "EMAIL_USER";

/// Environment variable holding the SMTP password.
pub const EMAIL_PASS_VAR: &str = "EMAIL_PASS";

// =============================================================================
// Probe Configuration
// =============================================================================

/// Probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Hosts to probe, in order.
    pub hosts: Vec<String>,

    /// Maximum wait for an echo reply.
    pub timeout: Duration,

    /// Delay after each probe.
    pub delay: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            hosts: DEFAULT_HOSTS.iter().map(|h| h.to_string()).collect(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            delay: DEFAULT_PROBE_DELAY,
        }
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Result log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Spreadsheet path, relative to the working directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

// =============================================================================
// SMTP Configuration
// =============================================================================

/// Login for the SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name, also used as sender and recipient.
    pub user: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Mail delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,

    /// Relay port (implicit TLS).
    pub port: u16,

    /// Timeout for each SMTP command and for the whole delivery.
    pub timeout: Duration,

    /// Login name, read from `EMAIL_USER`.
    #[serde(skip)]
    pub user: Option<String>,

    /// Password, read from `EMAIL_PASS`.
    #[serde(skip)]
    pub password: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            timeout: DEFAULT_SMTP_TIMEOUT,
            user: None,
            password: None,
        }
    }
}

impl SmtpConfig {
    /// Read credentials from the process environment.
    ///
    /// Empty values are treated as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            user: read(EMAIL_USER_VAR),
            password: read(EMAIL_PASS_VAR),
            ..Self::default()
        }
    }

    /// Set the login.
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Both halves of the login.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingCredential` naming the first unset variable.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let user = self
            .user
            .clone()
            .ok_or(ConfigError::MissingCredential(EMAIL_USER_VAR))?;
        let password = self
            .password
            .clone()
            .ok_or(ConfigError::MissingCredential(EMAIL_PASS_VAR))?;
        Ok(Credentials { user, password })
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Probe settings.
    pub probe: ProbeConfig,

    /// Result log settings.
    pub storage: StorageConfig,

    /// Mail delivery settings.
    pub smtp: SmtpConfig,
}

impl AppConfig {
    /// Load configuration for a run.
    ///
    /// Reads a `.env` file from the working directory when one exists, then
    /// picks the SMTP credentials from the environment. Everything else uses
    /// the built-in defaults. Missing credentials are not an error here; they
    /// surface when the report is sent.
    pub fn load() -> Self {
        match dotenv::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!(error = %e, "Failed to load .env file"),
        }

        let config = Self {
            smtp: SmtpConfig::from_env(),
            ..Self::default()
        };

        if config.smtp.credentials().is_err() {
            tracing::warn!(
                "{} / {} not set, the report email will not be sent",
                EMAIL_USER_VAR,
                EMAIL_PASS_VAR
            );
        }

        config
    }
}
