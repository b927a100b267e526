//! Report message assembly.

use std::path::{Path, PathBuf};

use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};

use super::error::ReportError;
use super::mailer::{MailTransport, SmtpMailer};
use crate::config::{AppConfig, ConfigError, DEFAULT_OUTPUT_FILE, EMAIL_USER_VAR};

/// Subject line of the report email.
pub const REPORT_SUBJECT: &str = "Ping Log Report";

/// Plain-text body of the report email.
pub const REPORT_BODY: &str = "Attached is the latest ping log report.";

/// MIME type used for the spreadsheet attachment.
const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// What happened to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The message was accepted by the transport.
    Sent,
    /// The log file does not exist; nothing was sent.
    Skipped,
}

/// Sends the result log to the configured mailbox.
///
/// The sender and recipient are the same address.
pub struct Reporter<T> {
    path: PathBuf,
    address: Option<String>,
    transport: T,
}

impl<T> std::fmt::Debug for Reporter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("path", &self.path)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl<T> Reporter<T> {
    /// Log file that gets attached.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl Reporter<SmtpMailer> {
    /// Reporter for the configured log file and SMTP relay.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.storage.path,
            config.smtp.user.clone(),
            SmtpMailer::new(config.smtp.clone()),
        )
    }
}

impl<T: MailTransport> Reporter<T> {
    /// Create a reporter with an explicit transport.
    pub fn new(path: impl AsRef<Path>, address: Option<String>, transport: T) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            address,
            transport,
        }
    }

    /// Email the log file as an attachment.
    ///
    /// Returns `Ok(ReportOutcome::Skipped)` without touching the transport
    /// when the file does not exist.
    ///
    /// # Errors
    /// - `ReportError::Credentials` if no address is configured
    /// - `ReportError::Attachment` if the file cannot be read
    /// - `ReportError::Auth` / `Connect` / `Other` from the transport
    pub async fn send_report(&self) -> Result<ReportOutcome, ReportError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Log file not found, skipping email");
                return Ok(ReportOutcome::Skipped);
            }
            Err(e) => return Err(self.attachment_error(e)),
        }

        let message = self.build_message().await?;
        self.transport.send(message).await?;

        tracing::info!(path = %self.path.display(), "Email sent successfully");
        Ok(ReportOutcome::Sent)
    }

    async fn build_message(&self) -> Result<Message, ReportError> {
        let address = self
            .address
            .as_deref()
            .ok_or(ConfigError::MissingCredential(EMAIL_USER_VAR))?;
        let mailbox: Mailbox = address.parse()?;

        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.attachment_error(e))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
        let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
            .map_err(|e| ReportError::Build(e.to_string()))?;

        let message = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(REPORT_SUBJECT)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(REPORT_BODY.to_string()))
                    .singlepart(Attachment::new(file_name).body(data, content_type)),
            )?;

        Ok(message)
    }

    fn attachment_error(&self, source: std::io::Error) -> ReportError {
        ReportError::Attachment {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<Message>>,
    }

    #[async_trait::async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, message: Message) -> Result<(), ReportError> {
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    struct RejectingTransport;

    #[async_trait::async_trait]
    impl MailTransport for RejectingTransport {
        async fn send(&self, _message: Message) -> Result<(), ReportError> {
            Err(ReportError::Auth("535 5.7.8 Username and Password not accepted".into()))
        }
    }

    #[tokio::test]
    async fn test_missing_file_skips_without_sending() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(
            dir.path().join("ping_log.xlsx"),
            Some("me@example.com".into()),
            RecordingTransport::default(),
        );

        let outcome = reporter.send_report().await.unwrap();
        assert_eq!(outcome, ReportOutcome::Skipped);
        assert!(reporter.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sends_file_as_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ping_log.xlsx");
        std::fs::write(&path, b"spreadsheet bytes").unwrap();

        let reporter = Reporter::new(
            &path,
            Some("me@example.com".into()),
            RecordingTransport::default(),
        );
        let outcome = reporter.send_report().await.unwrap();
        assert_eq!(outcome, ReportOutcome::Sent);

        let sent = reporter.transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);

        let envelope = sent[0].envelope();
        assert_eq!(envelope.to().len(), 1);
        assert_eq!(envelope.to()[0].to_string(), "me@example.com");
        assert_eq!(
            envelope.from().map(|a| a.to_string()),
            Some("me@example.com".to_string())
        );

        let raw = String::from_utf8_lossy(&sent[0].formatted()).into_owned();
        assert!(raw.contains("Subject: Ping Log Report"));
        assert!(raw.contains("filename=\"ping_log.xlsx\""));
        assert!(raw.contains("application/octet-stream"));
    }

    #[tokio::test]
    async fn test_missing_address_is_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ping_log.xlsx");
        std::fs::write(&path, b"x").unwrap();

        let reporter = Reporter::new(&path, None, RecordingTransport::default());
        let err = reporter.send_report().await.unwrap_err();
        assert!(matches!(err, ReportError::Credentials(_)));
        assert!(reporter.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ping_log.xlsx");
        std::fs::write(&path, b"x").unwrap();

        let reporter = Reporter::new(&path, Some("not an address".into()), RecordingTransport::default());
        let err = reporter.send_report().await.unwrap_err();
        assert!(matches!(err, ReportError::Address(_)));
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ping_log.xlsx");
        std::fs::write(&path, b"x").unwrap();

        let reporter = Reporter::new(&path, Some("me@example.com".into()), RejectingTransport);
        let err = reporter.send_report().await.unwrap_err();
        assert!(matches!(err, ReportError::Auth(_)));
    }
}
