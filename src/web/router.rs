//! Router configuration for the mail API.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{SendEmailRequest, SentEmail};
use super::error::ApiError;
use super::handlers::{send::send_welcome, AppState};

/// OpenAPI document for the mail API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Unify Mail API",
        description = "API for sending welcome emails",
        version = "1.0.0"
    ),
    paths(super::handlers::send::send_welcome),
    components(schemas(SendEmailRequest, SentEmail))
)]
pub struct ApiDoc;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let production = app_state.production;

    Router::new()
        .route("/send", post(send_welcome))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(
                    move |panic: Box<dyn Any + Send + 'static>| {
                        unhandled_error_response(panic, production)
                    },
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create the Swagger UI router serving the OpenAPI document.
pub fn create_swagger_router() -> Router {
    Router::new().merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Convert a handler panic into the uniform unhandled-error envelope.
fn unhandled_error_response(panic: Box<dyn Any + Send + 'static>, production: bool) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied());

    tracing::error!(
        "request handling panicked: {}",
        detail.unwrap_or("unknown panic")
    );

    let details = if production {
        None
    } else {
        detail.map(str::to_string)
    };

    ApiError::unhandled(details).into_response()
}
