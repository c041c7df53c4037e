use serde::Deserialize;

use crate::error::ValidationError;

pub mod resource;
pub mod user;

/// Identifier as clients send it in JSON bodies: a number or a numeric string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum IdParam {
    Number(i64),
    Text(String),
}

impl IdParam {
    pub fn parse<T: TryFrom<i64>>(&self) -> Result<T, ValidationError> {
        match self {
            Self::Number(id) => T::try_from(*id).map_err(|_| invalid_id(&id.to_string())),
            Self::Text(raw) => parse_id(raw),
        }
    }
}

pub fn parse_id<T: TryFrom<i64>>(raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| T::try_from(id).ok())
        .ok_or_else(|| invalid_id(raw))
}

fn invalid_id(raw: &str) -> ValidationError {
    ValidationError::InvalidInput {
        value: raw.to_string(),
        reason: "identifier must be an integer".to_string(),
    }
}

/// Unwraps a required text field, treating blank input as missing.
pub fn required(value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingFields)
}

pub fn required_id<T: TryFrom<i64>>(value: Option<IdParam>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingFields)?.parse()
}
