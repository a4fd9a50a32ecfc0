//! Welcome email handler.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use std::sync::Arc;
use utoipa;

use crate::mail::{Mailer, OutboundEmail};
use crate::web::dto::{SendEmailRequest, SentEmail, SuccessEnvelope};
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared mail-delivery capability.
    pub mailer: Arc<dyn Mailer>,
    /// Sender address stamped on outbound mail.
    pub sender: String,
    /// Whether the service runs in production mode (suppresses error details).
    pub production: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(mailer: Arc<dyn Mailer>, sender: impl Into<String>, production: bool) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            production,
        }
    }
}

/// POST /send - Send the welcome email with a validation link.
#[utoipa::path(
    post,
    path = "/send",
    tag = "mail",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email sent successfully", body = SentEmail),
        (status = 400, description = "Missing required field"),
        (status = 401, description = "SMTP authentication failed"),
        (status = 502, description = "SMTP server not found"),
        (status = 504, description = "Timed out communicating with SMTP server"),
        (status = 500, description = "Could not send the email")
    )
)]
pub async fn send_welcome(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<SuccessEnvelope<SentEmail>>, ApiError> {
    // A body the deserializer rejects still gets the uniform envelope.
    let Json(req) =
        payload.map_err(|e| ApiError::validation(format!("invalid request body: {e}")))?;

    let to = req
        .recipient()
        .ok_or_else(|| ApiError::validation("the 'to' field is required"))?;
    let validation_url = req
        .canonical_validation_url()
        .ok_or_else(|| ApiError::validation("the 'validationUrl' field is required"))?;

    let email = OutboundEmail::welcome(&state.sender, to, validation_url);

    // Single delivery attempt; transient failures surface to the caller.
    let receipt = state.mailer.send(&email).await.map_err(|e| {
        tracing::warn!(kind = ?e.kind, to = %email.to, "welcome email delivery failed: {}", e.message);
        ApiError::from_delivery(&e, state.production)
    })?;

    tracing::info!(message_id = %receipt.message_id, to = %email.to, "welcome email sent");

    Ok(Json(SuccessEnvelope::new(
        "EMAIL_SENT",
        "email sent successfully",
        SentEmail {
            message_id: receipt.message_id,
            to: email.to,
            subject: email.subject,
            validation_url: validation_url.to_string(),
        },
    )))
}
