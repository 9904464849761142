use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::errors::CatalogError;
use crate::application::use_cases::DeleteRepositoryError;

const INTERNAL_MESSAGE: &str = "internal server error";

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// 500 with a fixed message; the cause only goes to the log
    pub fn internal_error(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<DeleteRepositoryError> for ApiError {
    fn from(err: DeleteRepositoryError) -> Self {
        match err {
            DeleteRepositoryError::NotFound(_) => ApiError::not_found("Repository not found"),
            DeleteRepositoryError::DeletionDisabled => {
                ApiError::forbidden("Repository deletion is disabled")
            }
            e @ DeleteRepositoryError::TagRemovalFailed(_) => ApiError::unprocessable(e.to_string()),
            e @ DeleteRepositoryError::RepositoryRemovalFailed(_) => {
                ApiError::unprocessable(e.to_string())
            }
            DeleteRepositoryError::Store(e) => ApiError::internal_error(e),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RepositoryNotFound(_) => ApiError::not_found("Repository not found"),
            CatalogError::TagNotFound(_) => ApiError::not_found("Tag not found"),
            CatalogError::Store(e) => ApiError::internal_error(e),
        }
    }
}
