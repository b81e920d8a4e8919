//! Common error types and the error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A named operation failed server-side
    #[error("{message}: {detail}")]
    Operation { message: String, detail: String },

    /// Dependency probe failed (health checks)
    #[error("{message}: {detail}")]
    Unavailable { message: String, detail: String },
}

/// `{success: false, message, error?}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Error::Database(_) | Error::Internal(_) | Error::Operation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Build the response envelope for this error.
    ///
    /// Client errors carry their message verbatim. Server-side failures get a
    /// generic message with the underlying error text in `error`.
    pub fn envelope(&self) -> ErrorEnvelope {
        let (message, error) = match self {
            Error::Authentication(msg)
            | Error::Validation(msg)
            | Error::NotFound(msg)
            | Error::Conflict(msg) => (msg.clone(), None),
            Error::Unavailable { message, detail } | Error::Operation { message, detail } => {
                (message.clone(), Some(detail.clone()))
            }
            Error::Database(_) | Error::Internal(_) => {
                ("Internal server error".to_string(), Some(self.to_string()))
            }
        };

        ErrorEnvelope {
            success: false,
            message,
            error,
        }
    }
}

impl Error {
    /// Wrap a server-side failure under an operation-level message,
    /// e.g. `Error::failed("Failed to create post", e)`.
    pub fn failed(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Error::Operation {
            message: message.into(),
            detail: cause.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        (status, Json(self.envelope())).into_response()
    }
}
