//! API error handling and the error half of the response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::mail::{DeliveryError, DeliveryErrorKind};

/// Domain error codes carried in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request payload failed presence validation (400).
    ValidationError,
    /// SMTP credentials were rejected (401).
    SmtpAuthFailed,
    /// SMTP host could not be resolved (502).
    SmtpHostNotFound,
    /// Timed out talking to the SMTP server (504).
    SmtpTimeout,
    /// Delivery failed for any other reason (500).
    EmailSendFailed,
    /// Catch-all for failures nothing else converted (500).
    UnhandledError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::SmtpAuthFailed => StatusCode::UNAUTHORIZED,
            ErrorCode::SmtpHostNotFound => StatusCode::BAD_GATEWAY,
            ErrorCode::SmtpTimeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorCode::EmailSendFailed | ErrorCode::UnhandledError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error envelope body.
///
/// Same shape as the success envelope with `ok` set to `false`; `details`
/// and `errors` are omitted from the serialized body when absent.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub ok: bool,
    /// Domain error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Internal error detail. Never set in production mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Field-level error list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// API error type.
///
/// Converts into an HTTP response carrying the uniform error envelope.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<String>,
    errors: Option<Vec<String>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            errors: None,
        }
    }

    /// Create a validation error (400).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Create the catch-all unhandled error (500).
    ///
    /// `details` should already be `None` in production mode.
    pub fn unhandled(details: Option<String>) -> Self {
        Self {
            code: ErrorCode::UnhandledError,
            message: "unhandled error".to_string(),
            details,
            errors: None,
        }
    }

    /// Map a classified delivery failure to its domain error.
    ///
    /// Total over the classification: unrecognized failures fall through to
    /// `EMAIL_SEND_FAILED`. The raw transport message is attached as
    /// `details` only outside production mode.
    pub fn from_delivery(err: &DeliveryError, production: bool) -> Self {
        let (code, message) = match err.kind {
            DeliveryErrorKind::Auth => (ErrorCode::SmtpAuthFailed, "SMTP authentication failed"),
            DeliveryErrorKind::HostNotFound => {
                (ErrorCode::SmtpHostNotFound, "SMTP server not found")
            }
            DeliveryErrorKind::Timeout => (
                ErrorCode::SmtpTimeout,
                "timed out communicating with SMTP server",
            ),
            DeliveryErrorKind::Other => (ErrorCode::EmailSendFailed, "could not send the email"),
        };

        let details = if production {
            None
        } else {
            Some(err.message.clone())
        };

        Self {
            code,
            message: message.to_string(),
            details,
            errors: None,
        }
    }

    /// The domain error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorEnvelope {
            ok: false,
            code: self.code,
            message: self.message,
            details: self.details,
            errors: self.errors,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
