//! API error types for lfa-studio

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::journey::ProgressError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Quest progression precondition violation (400)
    #[error(transparent)]
    Progress(#[from] ProgressError),

    /// Component payload tag disagrees with the declared type (400)
    #[error("Content type mismatch: payload is {payload}, component is {declared}")]
    ContentTypeMismatch { payload: String, declared: String },

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// lfa-common error
    #[error("Common error: {0}")]
    Common(lfa_common::Error),
}

impl From<lfa_common::Error> for ApiError {
    fn from(err: lfa_common::Error) -> Self {
        match err {
            lfa_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            lfa_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Common(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Progress(ref err) => {
                let code = match err {
                    ProgressError::OutOfOrderQuest { .. } => "OUT_OF_ORDER_QUEST",
                    ProgressError::UnknownLevel(_) | ProgressError::UnknownQuest { .. } => {
                        "UNKNOWN_QUEST"
                    }
                };
                (StatusCode::BAD_REQUEST, code, err.to_string())
            }
            ApiError::ContentTypeMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                "CONTENT_TYPE_MISMATCH",
                self.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
            ApiError::Common(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
