pub const API_PREFIX: &str = "/api/v1";

/// Header carrying the bearer token on protected routes.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub const SIGNUP_TOKEN_TTL_DAYS: i64 = 30;
pub const LOGIN_TOKEN_TTL_DAYS: i64 = 1;
