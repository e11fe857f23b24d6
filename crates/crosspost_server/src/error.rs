//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crosspost_error::{CrosspostError, CrosspostErrorKind};
use serde_json::json;

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An HTTP error rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{} {}", status, message)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 503 Service Unavailable.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// 413 Payload Too Large.
    pub fn too_large(max_bytes: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "File too large. Maximum size is {}MB.",
                max_bytes / (1024 * 1024)
            ),
        )
    }

    /// 404 Not Found.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Endpoint not found")
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message returned to the caller.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CrosspostError> for ApiError {
    /// Validation and build errors become 400, anything else 500.
    fn from(err: CrosspostError) -> Self {
        match err.kind() {
            CrosspostErrorKind::Validation(e) => Self::bad_request(e.kind.to_string()),
            CrosspostErrorKind::Build(e) => Self::bad_request(e.kind().to_string()),
            other => {
                tracing::error!(error = %other, "Request failed");
                Self::internal("Upload failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
