use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::auth::error::AuthError;
use crate::auth::token::Claims;
use crate::error::SessionError;
use crate::models::user::UserId;
use crate::server::constants::AUTH_TOKEN_HEADER;
use crate::server::state::AppState;

/// Gate for protected routes: verifies the session header and stores the
/// resulting [`Claims`] in the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let token = request
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            debug!("request to protected route without {AUTH_TOKEN_HEADER} header");
            SessionError::TokenNotFound
        })?
        .to_str()
        .map_err(|_| {
            debug!("session header is not valid ascii");
            SessionError::BadToken(AuthError::Malformed)
        })?;
    let claims = state.tokens.verify(token).map_err(|e| {
        debug!("rejected session token: {e}");
        SessionError::BadToken(e)
    })?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Id of the user whose session passed [`require_auth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionUser(pub UserId);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .ok_or(SessionError::TokenNotFound)?;
        let user_id = claims.user_id().map_err(SessionError::BadToken)?;
        Ok(Self(user_id))
    }
}
