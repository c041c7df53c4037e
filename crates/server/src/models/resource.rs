use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ValidationError;
use crate::models::user::UserId;
use crate::models::{required, required_id, IdParam};

pub type ResourceId = i64;
pub type CommentId = i64;
pub type PhotoId = i64;

#[derive(
    Clone, Debug, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, sqlx::Type,
)]
#[sqlx(type_name = "resource_status")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceStatus {
    #[default]
    Pending,
    Published,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub views: i64,
    pub likes: i64,
    #[serde(rename = "downloadCount")]
    pub download_count: i64,
    pub status: ResourceStatus,
    pub department: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub category: String,
    pub filepath: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    pub content: String,
    pub likes: i64,
    pub dislikes: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Photo {
    pub id: PhotoId,
    pub url: String,
    pub alt: String,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

/// A resource together with its owned comments and photos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDetails {
    #[serde(flatten)]
    pub resource: Resource,
    pub comments: Vec<Comment>,
    pub photos: Vec<Photo>,
}

#[derive(Clone, Debug)]
pub struct NewResource {
    pub name: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub department: String,
    pub user_id: UserId,
    pub category: String,
    pub filepath: String,
}

/// Selects the resources a bulk read touches (and bumps the views of).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceFilter {
    ByUser(UserId),
    ByDepartment(String),
    /// Case-insensitive substring of title, description or tags.
    Search(String),
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            Self::ByUser(user_id) => resource.user_id == *user_id,
            Self::ByDepartment(department) => resource.department == *department,
            Self::Search(query) => {
                let query = query.to_lowercase();
                [&resource.title, &resource.description, &resource.tags]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            }
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateResourceRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub department: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<IdParam>,
    pub category: Option<String>,
    pub filepath: Option<String>,
}

impl CreateResourceRequest {
    pub fn validate(self) -> Result<NewResource, ValidationError> {
        Ok(NewResource {
            name: required(self.name)?,
            title: required(self.title)?,
            description: required(self.description)?,
            tags: required(self.tags)?,
            department: required(self.department)?,
            user_id: required_id(self.user_id)?,
            category: required(self.category)?,
            filepath: required(self.filepath)?,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceResponse<T> {
    pub resource: T,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourcesResponse {
    pub resources: Vec<ResourceDetails>,
}
