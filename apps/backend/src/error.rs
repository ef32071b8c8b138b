//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quizwall_core::{CoreError, StorageError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Core(CoreError::Storage(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::BadRequest(e.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    /// Message without the category prefix, as carried in message responses.
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound(m) | ApiError::BadRequest(m) => m.clone(),
            ApiError::Core(e) => e.to_string(),
        }
    }

    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Core(CoreError::UnknownTemplate(_)) => {
                (StatusCode::BAD_REQUEST, "unknown_template")
            }
            ApiError::Core(CoreError::CardNotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Core(CoreError::IndexOutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            ApiError::Core(CoreError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            ApiError::Core(CoreError::InvalidUrl(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
