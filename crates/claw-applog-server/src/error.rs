//! Error types for the log collection server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use claw_applog::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ApiError>;

/// Errors that can occur in the log collection server.
///
/// Store failures display a fixed message; the underlying error, which names
/// filesystem paths, is only logged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request fields.
    #[error("{0}")]
    Validation(String),

    /// Appending an uploaded record failed.
    #[error("Unable to write log to file")]
    Upload(#[source] StoreError),

    /// Reading an application's partitions failed.
    #[error("Unable to read application logs")]
    Query(#[source] StoreError),

    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Invalid server configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status and error type for this error.
    #[must_use]
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::Upload(StoreError::InvalidRecord(_)) | Self::Query(StoreError::InvalidRecord(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            Self::Upload(_) | Self::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
            Self::BindFailed(_, _) | Self::Config(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Upload(StoreError::InvalidRecord(e)) | Self::Query(StoreError::InvalidRecord(e)) => {
                e.to_string()
            }
            Self::BindFailed(_, _) | Self::Config(_) | Self::Internal(_) => {
                "internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();

        if status.is_server_error() {
            match &self {
                Self::Upload(source) | Self::Query(source) => {
                    error!(error = %source, "{}", self);
                }
                _ => error!(error = %self, "request failed"),
            }
        }

        let body = ErrorResponse {
            error: error_type,
            message: self.public_message(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}
