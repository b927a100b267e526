//! SMTP delivery.

use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::error::{ReportError, SmtpFailure};
use crate::config::SmtpConfig;

/// Delivery seam for report messages.
///
/// Implementations send exactly once and never retry.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a fully built message.
    async fn send(&self, message: Message) -> Result<(), ReportError>;
}

/// SMTP-over-TLS mailer.
///
/// Opens a fresh implicit-TLS session per message and logs in with the
/// configured credentials.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a mailer for the configured relay.
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, ReportError> {
        let creds = self.config.credentials()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(classify)?
            .port(self.config.port)
            .credentials(SmtpCredentials::new(creds.user, creds.password))
            .timeout(Some(self.config.timeout))
            .build();

        Ok(transport)
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: Message) -> Result<(), ReportError> {
        let transport = self.transport()?;

        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            "Sending report over SMTP"
        );

        // The per-command timeout does not cover the TLS handshake.
        let response = tokio::time::timeout(self.config.timeout, transport.send(message))
            .await
            .map_err(|_| {
                ReportError::Connect(format!(
                    "no response from {}:{} within {:?}",
                    self.config.host, self.config.port, self.config.timeout
                ))
            })?
            .map_err(classify)?;
        tracing::debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}

/// Map a lettre SMTP error onto the report error taxonomy.
fn classify(e: lettre::transport::smtp::Error) -> ReportError {
    let status = e
        .status()
        .and_then(|code| code.to_string().parse::<u16>().ok());
    let server_replied = status.is_some() || e.is_response() || e.is_client();
    SmtpFailure::classify(status, server_replied).into_error(e.to_string())
}
