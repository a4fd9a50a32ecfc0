//! SMTP delivery for welcome emails.
//!
//! A thin abstraction over [lettre](https://lettre.rs): the [`Mailer`] trait
//! is the seam the web layer depends on, [`SmtpMailer`] is the production
//! implementation. The transport is built once at startup and shared across
//! requests; connection pooling is lettre's concern.

pub mod mailer;
pub mod message;

pub use mailer::{DeliveryReceipt, Mailer, SmtpMailer};
pub use message::{render_welcome_html, OutboundEmail, WELCOME_SUBJECT};

use thiserror::Error;

/// Classification of a transport failure into a fixed set of buckets.
///
/// Consumed by the web layer's error mapping; anything the transport cannot
/// pin down lands in [`DeliveryErrorKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorKind {
    /// The SMTP server rejected our credentials.
    Auth,
    /// The SMTP host could not be resolved.
    HostNotFound,
    /// The connection or operation timed out.
    Timeout,
    /// Any other failure.
    Other,
}

/// A transport-originated delivery failure.
#[derive(Debug, Clone, Error)]
#[error("delivery failed: {message}")]
pub struct DeliveryError {
    /// Failure classification.
    pub kind: DeliveryErrorKind,
    /// Raw transport error text. Never surfaced to callers in production mode.
    pub message: String,
}

impl DeliveryError {
    /// Create a new delivery error.
    pub fn new(kind: DeliveryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::new(DeliveryErrorKind::Timeout, "connection timed out");
        assert_eq!(err.to_string(), "delivery failed: connection timed out");
        assert_eq!(err.kind, DeliveryErrorKind::Timeout);
    }

    #[test]
    fn test_delivery_error_kind_is_copy() {
        let kind = DeliveryErrorKind::Auth;
        let copied = kind;
        assert_eq!(kind, copied);
    }
}
