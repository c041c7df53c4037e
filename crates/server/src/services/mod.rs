use tracing::warn;

use crate::error::RequestError;
use crate::models::user::UserId;

pub mod resources;
pub mod users;

/// Writes are only allowed on records owned by the session user.
fn ensure_owner(session_user: UserId, owner: UserId) -> Result<(), RequestError> {
    if session_user != owner {
        warn!("user {session_user} tried to modify records of user {owner}");
        return Err(RequestError::Forbidden);
    }
    Ok(())
}
