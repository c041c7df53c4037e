use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use thiserror::Error;

/// Reasons a presented bearer token is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token has expired")]
    ExpiredToken,
    #[error("token signature doesn't match")]
    InvalidSignature,
    #[error("token is malformed")]
    Malformed,
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::ExpiredToken,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::Malformed,
        }
    }
}
