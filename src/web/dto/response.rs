//! Response DTOs for the mail API.

use serde::Serialize;
use utoipa::ToSchema;

/// Uniform success envelope.
///
/// Shares its shape with the error envelope; `ok` discriminates.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T: Serialize> {
    /// Always `true`.
    pub ok: bool,
    /// Domain code for the outcome.
    pub code: &'static str,
    /// Human-readable message.
    pub message: &'static str,
    /// Outcome payload.
    pub data: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Create a new success envelope.
    pub fn new(code: &'static str, message: &'static str, data: T) -> Self {
        Self {
            ok: true,
            code,
            message,
            data,
        }
    }
}

/// Data payload echoed after a successful delivery.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentEmail {
    /// Message-ID stamped on the delivered message.
    pub message_id: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Validation link embedded in the email body.
    pub validation_url: String,
}
