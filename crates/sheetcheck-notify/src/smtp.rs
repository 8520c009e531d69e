//! SMTP delivery through lettre.

use std::fmt;
use std::str::FromStr;

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dispatch::NotificationPayload;
use crate::error::TransportError;
use crate::transport::{MailTransport, join};

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// How the connection to the SMTP server is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS.
    #[default]
    StartTls,
    /// Implicit TLS from the first byte (usually port 465).
    Tls,
    /// No encryption. Only for local relays.
    None,
}

impl SmtpSecurity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartTls => "starttls",
            Self::Tls => "tls",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SmtpSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmtpSecurity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starttls" => Ok(Self::StartTls),
            "tls" | "ssl" => Ok(Self::Tls),
            "none" | "plain" => Ok(Self::None),
            _ => Err(format!("Unknown SMTP security mode: {s}")),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub sender: String,
    pub credentials: Option<SmtpCredentials>,
}

/// Sends notifications over SMTP.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    sender: Mailbox,
    server: String,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("server", &self.server)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let sender = parse_mailbox(&settings.sender)?;
        let builder = match settings.security {
            SmtpSecurity::StartTls => SmtpTransport::starttls_relay(&settings.server)?,
            SmtpSecurity::Tls => SmtpTransport::relay(&settings.server)?,
            SmtpSecurity::None => SmtpTransport::builder_dangerous(&settings.server),
        };
        let mut builder = builder.port(settings.port);
        if let Some(credentials) = &settings.credentials {
            builder = builder.credentials(Credentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }
        Ok(Self {
            transport: builder.build(),
            sender,
            server: format!("{}:{}", settings.server, settings.port),
        })
    }

    fn build_message(&self, payload: &NotificationPayload) -> Result<Message, TransportError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(payload.subject.clone());
        for address in &payload.recipients.to {
            builder = builder.to(parse_mailbox(address)?);
        }
        for address in &payload.recipients.cc {
            builder = builder.cc(parse_mailbox(address)?);
        }
        let message = builder.multipart(MultiPart::alternative_plain_html(
            payload.text_body.clone(),
            payload.html_body.clone(),
        ))?;
        Ok(message)
    }
}

impl MailTransport for SmtpMailer {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError> {
        let message = self.build_message(payload)?;
        self.transport.send(&message)?;
        info!(
            server = %self.server,
            subject = %payload.subject,
            to = %join(&payload.recipients.to),
            "notification email sent"
        );
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, TransportError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| TransportError::Address {
            address: address.to_string(),
            source,
        })
}
