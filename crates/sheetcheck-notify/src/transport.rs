use tracing::{debug, info};

use crate::dispatch::NotificationPayload;
use crate::error::TransportError;

/// Something that can deliver a prepared notification.
///
/// Sending does not consume the payload, so a failed send can be retried
/// with the same payload.
pub trait MailTransport {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError>;
}

/// Writes payloads to the log instead of sending them. Used for dry runs.
///
/// Bodies quote cell values, so only the body length is logged unless
/// [`LogTransport::with_body`] turns the full text on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport {
    log_body: bool,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body(mut self, log_body: bool) -> Self {
        self.log_body = log_body;
        self
    }

    pub fn logs_body(&self) -> bool {
        self.log_body
    }
}

impl MailTransport for LogTransport {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError> {
        info!(
            subject = %payload.subject,
            to = %join(&payload.recipients.to),
            cc = %join(&payload.recipients.cc),
            body_chars = payload.text_body.chars().count(),
            "dry run: notification not sent"
        );
        if self.log_body {
            debug!(body = %payload.text_body, "dry run notification body");
        }
        Ok(())
    }
}

pub(crate) fn join<'a>(addresses: impl IntoIterator<Item = &'a String>) -> String {
    addresses
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
