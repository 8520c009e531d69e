//! Notification dispatch for sheetcheck.
//!
//! Decides whether a validation report warrants a message, routes it to
//! business-unit recipients, and hands the rendered payload to a
//! [`MailTransport`] such as [`SmtpMailer`] or [`LogTransport`].

mod dispatch;
mod error;
mod recipients;
mod smtp;
mod transport;

pub use dispatch::{
    DispatchOutcome, Dispatcher, NotificationPayload, NotificationPolicy, should_notify,
};
pub use error::{NotifyError, RecipientError, TransportError};
pub use recipients::{
    BusinessUnit, GENERAL_BUCKET, RecipientMap, Recipients, resolve_recipients, route,
};
pub use smtp::{DEFAULT_SMTP_PORT, SmtpCredentials, SmtpMailer, SmtpSecurity, SmtpSettings};
pub use transport::{LogTransport, MailTransport};
