use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

use crate::auth::middleware::SessionUser;
use crate::error::{RequestError, ValidationError};
use crate::models::user::{
    AuthResponse, EditProfileRequest, EmailQuery, LogInRequest, SignUpRequest,
    UpdateProfilePictureRequest, UpdateSocialLinksRequest, User, UserResponse, UsernameQuery,
};
use crate::server::handlers::JsonBody;
use crate::server::state::AppState;

fn found(user: Option<User>) -> Result<Json<UserResponse>, RequestError> {
    let user = user.ok_or(ValidationError::NotFound)?;
    Ok(Json(UserResponse { user }))
}

pub async fn sign_up(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<SignUpRequest>,
) -> Result<Json<AuthResponse>, RequestError> {
    Ok(Json(state.users.sign_up(request).await?))
}

pub async fn log_in(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<LogInRequest>,
) -> Result<Json<AuthResponse>, RequestError> {
    Ok(Json(state.users.log_in(request).await?))
}

pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    JsonBody(request): JsonBody<EditProfileRequest>,
) -> Result<Json<AuthResponse>, RequestError> {
    debug!("profile edit requested by user {user_id}");
    Ok(Json(state.users.edit_profile(user_id, request).await?))
}

pub async fn update_profile_picture(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    JsonBody(request): JsonBody<UpdateProfilePictureRequest>,
) -> Result<Json<UserResponse>, RequestError> {
    debug!("profile picture update requested by user {user_id}");
    let user = state.users.update_profile_picture(user_id, request).await?;
    Ok(Json(UserResponse { user }))
}

pub async fn update_social_links(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    JsonBody(request): JsonBody<UpdateSocialLinksRequest>,
) -> Result<Json<UserResponse>, RequestError> {
    debug!("social links update requested by user {user_id}");
    let user = state.users.update_social_links(user_id, request).await?;
    Ok(Json(UserResponse { user }))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, RequestError> {
    found(state.users.get_by_id(&id).await?)
}

pub async fn get_by_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<UserResponse>, RequestError> {
    found(state.users.get_by_email(query.email).await?)
}

pub async fn get_by_username(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<UserResponse>, RequestError> {
    found(state.users.get_by_username(query.username).await?)
}
