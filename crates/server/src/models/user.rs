use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{required, required_id, IdParam};

pub type UserId = i32;
pub type SocialLinkId = i64;

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "profilepictureurl")]
    pub profile_picture_url: String,
    #[serde(rename = "userName")]
    pub username: String,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
    #[serde(rename = "socialLinks")]
    #[sqlx(skip)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SocialLink {
    pub id: SocialLinkId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "iconUrl")]
    pub icon_url: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSocialLink {
    pub name: String,
    pub icon_url: String,
    pub url: String,
}

/// Everything persisted for a user besides server-assigned id and timestamps.
#[derive(Clone, Debug)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub profile_picture_url: String,
    pub username: String,
    pub social_links: Vec<NewSocialLink>,
}

/// Validated profile input, password still in plaintext.
#[derive(Clone, Debug)]
pub struct ProfileFields {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub profile_picture_url: String,
    pub username: String,
    pub social_links: Vec<NewSocialLink>,
}

impl ProfileFields {
    pub fn with_password_hash(self, password_hash: String) -> UserFields {
        UserFields {
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            password_hash,
            profile_picture_url: self.profile_picture_url,
            username: self.username,
            social_links: self.social_links,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SocialLinkInput {
    pub name: Option<String>,
    #[serde(rename = "iconUrl")]
    pub icon_url: Option<String>,
    pub url: Option<String>,
}

impl SocialLinkInput {
    pub fn validate(self) -> Result<NewSocialLink, ValidationError> {
        Ok(NewSocialLink {
            name: required(self.name)?,
            icon_url: required(self.icon_url)?,
            url: required(self.url)?,
        })
    }
}

fn validate_links(links: Vec<SocialLinkInput>) -> Result<Vec<NewSocialLink>, ValidationError> {
    links.into_iter().map(SocialLinkInput::validate).collect()
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignUpRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    pub profile_pic: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub sociallinks: Option<Vec<SocialLinkInput>>,
}

impl SignUpRequest {
    pub fn validate(self) -> Result<ProfileFields, ValidationError> {
        Ok(ProfileFields {
            name: required(self.name)?,
            email: required(self.email)?,
            phone_number: required(self.phonenumber)?,
            password: required(self.password)?,
            profile_picture_url: required(self.profile_pic)?,
            username: required(self.username)?,
            social_links: validate_links(self.sociallinks.ok_or(ValidationError::MissingFields)?)?,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LogInRequest {
    /// Returns `(email, password)`.
    pub fn validate(self) -> Result<(String, String), ValidationError> {
        Ok((required(self.email)?, required(self.password)?))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditProfileRequest {
    pub id: Option<IdParam>,
    #[serde(flatten)]
    pub profile: SignUpRequest,
}

impl EditProfileRequest {
    pub fn validate(self) -> Result<(UserId, ProfileFields), ValidationError> {
        let id = required_id(self.id)?;
        Ok((id, self.profile.validate()?))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateProfilePictureRequest {
    pub id: Option<IdParam>,
    pub url: Option<String>,
}

impl UpdateProfilePictureRequest {
    pub fn validate(self) -> Result<(UserId, String), ValidationError> {
        Ok((required_id(self.id)?, required(self.url)?))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateSocialLinksRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<IdParam>,
    #[serde(rename = "socialLinks")]
    pub social_links: Option<Vec<SocialLinkInput>>,
}

impl UpdateSocialLinksRequest {
    pub fn validate(self) -> Result<(UserId, Vec<NewSocialLink>), ValidationError> {
        let user_id = required_id(self.user_id)?;
        let links = self
            .social_links
            .filter(|links| !links.is_empty())
            .ok_or(ValidationError::MissingFields)?;
        Ok((user_id, validate_links(links)?))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}
