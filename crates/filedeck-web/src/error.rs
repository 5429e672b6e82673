//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filedeck_core::FsError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Error returned by JSON handlers, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    BadRequest(String),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A filesystem operation failed.
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Fs(FsError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Fs(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            Self::Fs(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
