//! Report-specific error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while sending the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// SMTP credentials are not configured.
    #[error("email credentials unavailable: {0}")]
    Credentials(#[from] ConfigError),

    /// The log file could not be opened for attaching.
    #[error("failed to open attachment {}: {source}", path.display())]
    Attachment {
        /// Attachment location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The sender/recipient address is not a valid mailbox.
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("failed to build email: {0}")]
    Build(String),

    /// The relay rejected the login.
    #[error("invalid email credentials, check the address and app password: {0}")]
    Auth(String),

    /// The relay could not be reached or the TLS session failed.
    #[error("unable to connect to the email server: {0}")]
    Connect(String),

    /// Any other delivery failure.
    #[error("error sending email: {0}")]
    Other(String),
}

impl From<lettre::error::Error> for ReportError {
    fn from(e: lettre::error::Error) -> Self {
        Self::Build(e.to_string())
    }
}

/// Coarse classification of an SMTP delivery failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpFailure {
    /// Authentication rejected (5.3.x / 53x replies).
    Auth,
    /// No reply from the server at all.
    Connect,
    /// Anything else.
    Other,
}

impl SmtpFailure {
    /// Classify from the reply code, if the server sent one, and whether
    /// any response was received.
    pub fn classify(status: Option<u16>, server_replied: bool) -> Self {
        match status {
            Some(code) if (530..540).contains(&code) => Self::Auth,
            Some(_) => Self::Other,
            None if server_replied => Self::Other,
            None => Self::Connect,
        }
    }

    /// Wrap an error message in the matching [`ReportError`] variant.
    pub fn into_error(self, message: impl Into<String>) -> ReportError {
        match self {
            Self::Auth => ReportError::Auth(message.into()),
            Self::Connect => ReportError::Connect(message.into()),
            Self::Other => ReportError::Other(message.into()),
        }
    }
}
