use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const TASK_NOT_FOUND_MESSAGE: &str = "Task not found";
pub const DATABASE_UNAVAILABLE_MESSAGE: &str = "Unable to reach database";

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(#[source] DbErr),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn task_not_found() -> Self {
        ApiError::NotFound(TASK_NOT_FOUND_MESSAGE.to_string())
    }

    pub fn endpoint_not_found() -> Self {
        ApiError::NotFound(ENDPOINT_NOT_FOUND_MESSAGE.to_string())
    }
}

impl From<PathRejection> for ApiError {
    // A path segment that is not a task id does not name any endpoint.
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected path parameters");
        ApiError::endpoint_not_found()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError"),
            ApiError::DatabaseUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseUnavailable")
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        // Internal detail stays in the logs.
        let error_message = match &self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::DatabaseUnavailable(_) => DATABASE_UNAVAILABLE_MESSAGE.to_string(),
            ApiError::Database(_) | ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        if status_code.is_server_error() {
            tracing::error!(
                status = %status_code,
                error_type,
                error = %self,
                "API request failed"
            );
        }
        let body = ErrorResponse {
            error: error_message,
        };
        (status_code, Json(body)).into_response()
    }
}
