//! Report Layer
//!
//! Emails the result log as an attachment.
//!
//! - [`Reporter`]: Builds the report message and hands it to a transport
//! - [`MailTransport`]: Delivery seam, implemented by [`SmtpMailer`]
//! - [`ReportError`]: Credentials, attachment, authentication and connection failures

mod error;
mod mailer;
mod reporter;

pub use error::{ReportError, SmtpFailure};
pub use mailer::{MailTransport, SmtpMailer};
pub use reporter::{REPORT_BODY, REPORT_SUBJECT, ReportOutcome, Reporter};
