//! Error types for Unify Mail.

use thiserror::Error;

/// Common error type for Unify Mail.
///
/// Covers startup-time failures (configuration, transport construction).
/// Request-time failures are handled by the web layer's `ApiError` and the
/// mail layer's `DeliveryError`.
#[derive(Error, Debug)]
pub enum UnimailError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// SMTP transport setup error.
    #[error("mail transport error: {0}")]
    Transport(String),
}

/// Result type alias for Unify Mail operations.
pub type Result<T> = std::result::Result<T, UnimailError>;
