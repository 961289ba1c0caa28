//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler or the auth guard can surface to a client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("User not found")]
    NotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    /// No bearer token on a protected route.
    #[error("Missing token")]
    Unauthenticated,

    /// Token present but its signature or shape is invalid.
    #[error("Invalid token")]
    Forbidden,

    #[error("{0}")]
    StoreFailure(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateUser | AppError::NotFound | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
