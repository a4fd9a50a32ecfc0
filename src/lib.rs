//! Unify Mail - welcome email delivery service.
//!
//! A thin HTTP integration layer: POST /send renders a fixed welcome email
//! around a caller-supplied validation link and hands it to an SMTP
//! transport, mapping transport failures to HTTP status codes.

pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use config::Config;
pub use error::{Result, UnimailError};
pub use mail::{
    DeliveryError, DeliveryErrorKind, DeliveryReceipt, Mailer, OutboundEmail, SmtpMailer,
};
pub use web::{create_router, ApiError, AppState, WebServer};
