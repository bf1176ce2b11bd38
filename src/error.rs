// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the editor session core and its ports.
///
/// `Fetch`, `QuestionRejected`, `Storage`, `Submit` and `MalformedDraft` are always handled
/// inside the session manager (they degrade the prompt, the draft or the
/// submit notice). The remaining variants reach the HTTP layer.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("question fetch failed: {0}")]
    Fetch(String),

    #[error("platform reported the question as unavailable")]
    QuestionRejected,

    #[error("draft storage failed: {0}")]
    Storage(String),

    #[error("submission upload failed: {0}")]
    Submit(String),

    #[error("malformed draft record: {0}")]
    MalformedDraft(String),

    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error("a submission for this session is already in flight")]
    SubmitInFlight,

    #[error("this session has already been submitted")]
    AlreadySubmitted,
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., submit while one is in flight)
    Conflict(String),

    // 502 Bad Gateway (the platform API failed)
    Upstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::SessionNotFound(_) => AppError::NotFound(err.to_string()),
            EditorError::SubmitInFlight | EditorError::AlreadySubmitted => {
                AppError::Conflict(err.to_string())
            }
            EditorError::Fetch(_) | EditorError::QuestionRejected | EditorError::Submit(_) => {
                AppError::Upstream(err.to_string())
            }
            EditorError::Storage(_) | EditorError::MalformedDraft(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}
