//! HTTP error handling.
//!
//! Every failure a handler can produce is an [`AppError`]; the response body
//! shape depends on the kind of failure:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `InvalidId` | 400 | `{"message": "id should be a number"}` |
//! | `Validation` | 400 | `{"errors": [...]}` |
//! | `NotFound` | 204 or 404 | `{"message": "Dog not found"}` |
//! | `MalformedBody` | 400 | `{"message": "Malformed JSON body: ..."}` |
//! | `BodyRejected` | rejection status | `{"message": ...}` |
//! | `Internal` | 500 | `{"error": "Internal server error"}` |

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ErrorBody, MessageBody, ValidationErrorBody};
use crate::db::repository::RepositoryError;
use crate::services::ValidationErrors;

pub const INVALID_ID_MESSAGE: &str = "id should be a number";
pub const DOG_NOT_FOUND_MESSAGE: &str = "Dog not found";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Path id is not a number
    InvalidId,
    /// Request body failed schema validation
    Validation(ValidationErrors),
    /// No dog with the requested id; the status differs per route
    NotFound { status: StatusCode },
    /// Request body is not valid JSON
    MalformedBody(String),
    /// Request body could not be read (too large, interrupted)
    BodyRejected(BytesRejection),
    /// Unexpected failure; the detail is logged, never returned
    Internal(String),
}

impl AppError {
    /// Map a repository error, answering not-found with `not_found_status`.
    pub fn from_repository(err: RepositoryError, not_found_status: StatusCode) -> Self {
        if err.is_not_found() {
            AppError::NotFound {
                status: not_found_status,
            }
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidId => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody::new(INVALID_ID_MESSAGE)),
            )
                .into_response(),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorBody {
                    errors: errors.messages(),
                }),
            )
                .into_response(),
            AppError::NotFound { status } => {
                (status, Json(MessageBody::new(DOG_NOT_FOUND_MESSAGE))).into_response()
            }
            AppError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody::new(format!("Malformed JSON body: {}", detail))),
            )
                .into_response(),
            AppError::BodyRejected(rejection) => (
                rejection.status(),
                Json(MessageBody::new(rejection.body_text())),
            )
                .into_response(),
            AppError::Internal(detail) => {
                tracing::error!("Internal server error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::from_repository(err, StatusCode::NOT_FOUND)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}
