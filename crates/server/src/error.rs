use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::error::AuthError;
use crate::database::error::StoreError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal error check the server log!!";

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid credentials!")]
    BadCredentials,
    #[error("User doesn't exits!")]
    UnknownUser,
    #[error("Access denied")]
    Forbidden,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("token creation failed: {0}")]
    TokenCreation(#[from] jsonwebtoken::errors::Error),
}

#[derive(Clone, Debug, Error)]
pub enum ValidationError {
    #[error("Please enter all fields")]
    MissingFields,
    #[error("input value is invalid: `{value}`, reason: {reason}")]
    InvalidInput { value: String, reason: String },
    #[error("User already exists!!")]
    AlreadyExists,
    #[error("Requested record doesn't exist")]
    NotFound,
}

/// Body of every error response.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = ErrorResponse {
        status: status.as_u16(),
        message,
    };
    (status, Json(body)).into_response()
}

impl RequestError {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(ValidationError::NotFound) => {
                (StatusCode::NOT_FOUND, ValidationError::NotFound.to_string())
            }
            Self::Validation(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            Self::Store(StoreError::UniqueViolation { .. }) => (
                StatusCode::UNAUTHORIZED,
                ValidationError::AlreadyExists.to_string(),
            ),
            Self::Store(StoreError::MissingReference { constraint }) => (
                StatusCode::UNAUTHORIZED,
                ValidationError::InvalidInput {
                    value: constraint.clone(),
                    reason: "referenced record doesn't exist".to_string(),
                }
                .to_string(),
            ),
            e @ (Self::BadCredentials | Self::UnknownUser) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            e @ Self::Forbidden => (StatusCode::FORBIDDEN, e.to_string()),
            e @ (Self::Store(StoreError::Sqlx(_)) | Self::Hashing(_) | Self::TokenCreation(_)) => {
                error!("received internal error for user request: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

/// Unparseable bodies are reported like any other invalid input.
impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::InvalidInput {
            value: "request body".to_string(),
            reason: rejection.body_text(),
        }
        .into()
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        error_response(status, message)
    }
}

#[derive(Clone, Debug, Error)]
pub enum SessionError {
    #[error("no session token in request")]
    TokenNotFound,
    #[error("session token rejected: {0}")]
    BadToken(AuthError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::TokenNotFound => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Self::BadToken(_) => (StatusCode::BAD_REQUEST, "Session expired"),
        };
        error_response(status, message.to_string())
    }
}
