// Custom error types and their conversion into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::FieldErrors;

/// Application-level error returned by handlers.
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    /// One of the upstream collaborators (backend API, mail provider) failed.
    Upstream(String),
    /// The submitted form did not pass schema validation.
    Validation(FieldErrors),
}

// Allow `?` on anyhow results inside handlers.
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            AppError::Upstream(message) => {
                tracing::error!("Upstream failure: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "success": false, "error": message })),
                )
                    .into_response()
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "success": false, "errors": errors })),
            )
                .into_response(),
        }
    }
}

/// Convenience alias for handler results.
pub type AppResult<T> = Result<T, AppError>;
