//! Error types for notification delivery.

use thiserror::Error;

/// Recipient routing problems. These are configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipientError {
    #[error("no recipients resolved for the notification; configure a default recipient list")]
    NoRecipients,
}

/// The mail transport could not deliver a payload.
#[derive(Debug, Error)]
pub enum TransportError {
    /// An address could not be parsed as a mailbox.
    #[error("invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The MIME message could not be assembled.
    #[error("failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    /// SMTP-level failure (connection, TLS, authentication, rejection).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Failure of [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
///
/// Recipient errors are configuration problems; transport errors are
/// delivery problems. Neither changes the validation outcome.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Recipients(#[from] RecipientError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
