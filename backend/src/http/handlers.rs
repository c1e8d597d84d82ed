//! HTTP handlers for the REST API.
//!
//! Each handler parses its inputs, validates the body against the dog schema
//! and delegates to the service layer for persistence.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{HealthResponse, MessageBody};
use super::error::{AppError, ROUTE_NOT_FOUND_MESSAGE};
use super::extract::JsonObject;
use super::params::parse_dog_id;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::Dog;
use crate::services::{validate_dog_changes, validate_new_dog};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Service endpoints
// =============================================================================

/// GET /
pub async fn root() -> Json<MessageBody> {
    Json(MessageBody::new("Hello World!"))
}

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

/// Any unmatched route.
pub async fn fallback() -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageBody::new(ROUTE_NOT_FOUND_MESSAGE)),
    )
}

// =============================================================================
// Dog CRUD
// =============================================================================

/// GET /dogs
pub async fn list_dogs(State(state): State<AppState>) -> HandlerResult<Vec<Dog>> {
    let dogs = db_services::list_dogs(state.repository.as_ref()).await?;
    Ok(Json(dogs))
}

/// GET /dogs/{id}
///
/// A missing dog is answered with 204.
pub async fn get_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HandlerResult<Dog> {
    let id = parse_dog_id(&raw_id)?.ok_or(AppError::NotFound {
        status: StatusCode::NO_CONTENT,
    })?;

    let dog = db_services::get_dog(state.repository.as_ref(), id)
        .await
        .map_err(|e| AppError::from_repository(e, StatusCode::NO_CONTENT))?;
    Ok(Json(dog))
}

/// POST /dogs
pub async fn create_dog(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Dog>), AppError> {
    let new_dog = validate_new_dog(&body)?;
    let dog = db_services::create_dog(state.repository.as_ref(), &new_dog).await?;
    Ok((StatusCode::CREATED, Json(dog)))
}

/// PATCH /dogs/{id}
///
/// Only the fields present in the body are changed. The body is validated
/// before the id; an id that cannot name a dog, numeric or not, is answered
/// with 404 like a missing dog. Success is answered with 201.
pub async fn update_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Dog>), AppError> {
    let changes = validate_dog_changes(&body)?;
    let not_found = AppError::NotFound {
        status: StatusCode::NOT_FOUND,
    };
    let id = match parse_dog_id(&raw_id) {
        Ok(Some(id)) => id,
        Ok(None) | Err(AppError::InvalidId) => return Err(not_found),
        Err(other) => return Err(other),
    };

    let dog = db_services::update_dog(state.repository.as_ref(), id, &changes).await?;
    Ok((StatusCode::CREATED, Json(dog)))
}

/// DELETE /dogs/{id}
///
/// Returns the deleted dog; a missing dog is answered with 204.
pub async fn delete_dog(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> HandlerResult<Dog> {
    let id = parse_dog_id(&raw_id)?.ok_or(AppError::NotFound {
        status: StatusCode::NO_CONTENT,
    })?;

    let dog = db_services::delete_dog(state.repository.as_ref(), id)
        .await
        .map_err(|e| AppError::from_repository(e, StatusCode::NO_CONTENT))?;
    Ok(Json(dog))
}
