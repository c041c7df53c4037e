use axum::async_trait;
use tracing::instrument;

use crate::database::connection::DbConnection;
use crate::database::error::StoreError;
use crate::database::{resources, users};
use crate::models::resource::{NewResource, Resource, ResourceDetails, ResourceFilter, ResourceId};
use crate::models::user::{NewSocialLink, User, UserFields, UserId};

/// Persistence for users and resources.
///
/// Implementations must make every `increment_views*` call a single atomic
/// increment-and-return, so concurrent readers never lose a view.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Persists the user and its social links together.
    async fn create_user(&self, user: &UserFields) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Replaces every profile field and the whole social link set.
    async fn update_user(&self, id: UserId, user: &UserFields) -> Result<Option<User>, StoreError>;

    async fn update_profile_picture(
        &self,
        id: UserId,
        url: &str,
    ) -> Result<Option<User>, StoreError>;

    async fn replace_social_links(
        &self,
        id: UserId,
        links: &[NewSocialLink],
    ) -> Result<Option<User>, StoreError>;

    async fn create_resource(&self, resource: &NewResource) -> Result<Resource, StoreError>;

    /// Reads one resource without counting a view.
    async fn find_resource(&self, id: ResourceId) -> Result<Option<Resource>, StoreError>;

    async fn increment_views(
        &self,
        id: ResourceId,
    ) -> Result<Option<ResourceDetails>, StoreError>;

    async fn increment_views_matching(
        &self,
        filter: &ResourceFilter,
    ) -> Result<Vec<ResourceDetails>, StoreError>;

    async fn delete_resource(&self, id: ResourceId) -> Result<Option<Resource>, StoreError>;
}

#[async_trait]
impl CredentialStore for DbConnection {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(users::email_exists(self.pool(), email).await?)
    }

    async fn create_user(&self, user: &UserFields) -> Result<User, StoreError> {
        let mut transaction = self.pool().begin().await?;
        let created = users::insert_user(&mut transaction, user).await?;
        transaction.commit().await?;
        Ok(created)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(users::select_user_by_id(self.pool(), id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(users::select_user_by_email(self.pool(), email).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(users::select_user_by_username(self.pool(), username).await?)
    }

    async fn update_user(&self, id: UserId, user: &UserFields) -> Result<Option<User>, StoreError> {
        let mut transaction = self.pool().begin().await?;
        let updated = users::update_user(&mut transaction, id, user).await?;
        transaction.commit().await?;
        Ok(updated)
    }

    async fn update_profile_picture(
        &self,
        id: UserId,
        url: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(users::update_profile_picture(self.pool(), id, url).await?)
    }

    async fn replace_social_links(
        &self,
        id: UserId,
        links: &[NewSocialLink],
    ) -> Result<Option<User>, StoreError> {
        let mut transaction = self.pool().begin().await?;
        let updated = users::replace_social_links(&mut transaction, id, links).await?;
        transaction.commit().await?;
        Ok(updated)
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<Resource, StoreError> {
        Ok(resources::insert_resource(self.pool(), resource).await?)
    }

    async fn find_resource(&self, id: ResourceId) -> Result<Option<Resource>, StoreError> {
        Ok(resources::select_resource_by_id(self.pool(), id).await?)
    }

    #[instrument(skip(self))]
    async fn increment_views(
        &self,
        id: ResourceId,
    ) -> Result<Option<ResourceDetails>, StoreError> {
        let mut transaction = self.pool().begin().await?;
        let Some(resource) = resources::increment_views_by_id(transaction.as_mut(), id).await?
        else {
            return Ok(None);
        };
        let details = resources::with_details(&mut transaction, vec![resource]).await?;
        transaction.commit().await?;
        Ok(details.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn increment_views_matching(
        &self,
        filter: &ResourceFilter,
    ) -> Result<Vec<ResourceDetails>, StoreError> {
        let mut transaction = self.pool().begin().await?;
        let matched = resources::increment_views_where(transaction.as_mut(), filter).await?;
        let details = resources::with_details(&mut transaction, matched).await?;
        transaction.commit().await?;
        Ok(details)
    }

    async fn delete_resource(&self, id: ResourceId) -> Result<Option<Resource>, StoreError> {
        Ok(resources::delete_resource(self.pool(), id).await?)
    }
}
