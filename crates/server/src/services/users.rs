use std::sync::Arc;

use chrono::Duration;
use tracing::{info, instrument, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenIssuer;
use crate::database::store::CredentialStore;
use crate::error::{RequestError, ValidationError};
use crate::models::{parse_id, required};
use crate::services::ensure_owner;
use crate::models::user::{
    AuthResponse, EditProfileRequest, LogInRequest, ProfileFields, SignUpRequest,
    UpdateProfilePictureRequest, UpdateSocialLinksRequest, User, UserFields, UserId,
};
use crate::server::constants::{LOGIN_TOKEN_TTL_DAYS, SIGNUP_TOKEN_TTL_DAYS};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenIssuer>,
}

fn hashed(fields: ProfileFields) -> Result<UserFields, RequestError> {
    let hash =
        hash_password(&fields.password).map_err(|e| RequestError::Hashing(e.to_string()))?;
    Ok(fields.with_password_hash(hash))
}

impl UserService {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { store, tokens }
    }

    fn authenticated(&self, user: User, ttl: Duration) -> Result<AuthResponse, RequestError> {
        let token = self.tokens.issue(user.id, ttl)?;
        Ok(AuthResponse { token, user })
    }

    #[instrument(skip_all)]
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<AuthResponse, RequestError> {
        let fields = request.validate()?;
        if self.store.email_exists(&fields.email).await? {
            warn!("signup rejected, email already registered");
            return Err(ValidationError::AlreadyExists.into());
        }
        let user = self.store.create_user(&hashed(fields)?).await?;
        info!("user {} signed up", user.id);
        self.authenticated(user, Duration::days(SIGNUP_TOKEN_TTL_DAYS))
    }

    #[instrument(skip_all)]
    pub async fn log_in(&self, request: LogInRequest) -> Result<AuthResponse, RequestError> {
        let (email, password) = request.validate()?;
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(RequestError::UnknownUser)?;
        if !verify_password(&password, &user.password_hash) {
            warn!("failed login attempt for user {}", user.id);
            return Err(RequestError::BadCredentials);
        }
        info!("user {} logged in", user.id);
        self.authenticated(user, Duration::days(LOGIN_TOKEN_TTL_DAYS))
    }

    #[instrument(skip(self, request))]
    pub async fn edit_profile(
        &self,
        session_user: UserId,
        request: EditProfileRequest,
    ) -> Result<AuthResponse, RequestError> {
        let (id, fields) = request.validate()?;
        ensure_owner(session_user, id)?;
        let user = self
            .store
            .update_user(id, &hashed(fields)?)
            .await?
            .ok_or(ValidationError::NotFound)?;
        self.authenticated(user, Duration::days(SIGNUP_TOKEN_TTL_DAYS))
    }

    #[instrument(skip(self, request))]
    pub async fn update_profile_picture(
        &self,
        session_user: UserId,
        request: UpdateProfilePictureRequest,
    ) -> Result<User, RequestError> {
        let (id, url) = request.validate()?;
        ensure_owner(session_user, id)?;
        Ok(self
            .store
            .update_profile_picture(id, &url)
            .await?
            .ok_or(ValidationError::NotFound)?)
    }

    #[instrument(skip(self, request))]
    pub async fn update_social_links(
        &self,
        session_user: UserId,
        request: UpdateSocialLinksRequest,
    ) -> Result<User, RequestError> {
        let (user_id, links) = request.validate()?;
        ensure_owner(session_user, user_id)?;
        Ok(self
            .store
            .replace_social_links(user_id, &links)
            .await?
            .ok_or(ValidationError::NotFound)?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Option<User>, RequestError> {
        let id: UserId = parse_id(raw_id)?;
        Ok(self.store.find_user_by_id(id).await?)
    }

    #[instrument(skip_all)]
    pub async fn get_by_email(&self, email: Option<String>) -> Result<Option<User>, RequestError> {
        let email = required(email)?;
        Ok(self.store.find_user_by_email(&email).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_username(
        &self,
        username: Option<String>,
    ) -> Result<Option<User>, RequestError> {
        let username = required(username)?;
        Ok(self.store.find_user_by_username(&username).await?)
    }
}
