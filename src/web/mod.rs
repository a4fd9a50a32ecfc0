//! Web API module for Unify Mail.
//!
//! A single-endpoint REST API: POST /send delivers the welcome email, with a
//! health probe and Swagger UI mounted alongside.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
