//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Storage failures are logged in full and reach the client only as a
//! generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::{SchoolId, ValidationErrors};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request failed its rule set (400)
    Validation(ValidationErrors),

    /// Update body names a different id than the path (400)
    IdMismatch { path: SchoolId },

    /// Update or delete touched no rows (404)
    NotFound(SchoolId),

    /// Storage error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "errors": e.errors })),
            Self::IdMismatch { path } => {
                tracing::debug!(%path, "body id does not match path id");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "ID in request body must match the ID in params" }),
                )
            }
            Self::NotFound(id) => {
                tracing::debug!(%id, "school not found");
                (StatusCode::NOT_FOUND, json!({ "error": "School not found" }))
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
