//! Authentication errors

use axum::response::{IntoResponse, Response};
use xsslab_common::Error;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No valid session on a route that needs one
    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Failed to sign session token: {0}")]
    TokenSigning(String),
}

impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated(message) => Error::Authentication(message.to_string()),
            AuthError::TokenSigning(_) => Error::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        Error::from(self).into_response()
    }
}
