//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, tracing, panic recovery),
//! and creates the axum router ready for serving.

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::error::AppError;
use super::handlers;
use super::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/dogs", get(handlers::list_dogs).post(handlers::create_dog))
        .route(
            "/dogs/{id}",
            get(handlers::get_dog)
                .patch(handlers::update_dog)
                .delete(handlers::delete_dog),
        )
        .fallback(handlers::fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
