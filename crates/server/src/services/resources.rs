use std::sync::Arc;

use tracing::{info, instrument};

use crate::database::store::CredentialStore;
use crate::error::{RequestError, ValidationError};
use crate::models::resource::{
    CreateResourceRequest, Resource, ResourceDetails, ResourceFilter, ResourceId,
};
use crate::models::user::UserId;
use crate::models::{parse_id, required};
use crate::services::ensure_owner;

/// Catalog operations. Every read bumps the view counter of what it returns.
#[derive(Clone)]
pub struct ResourceService {
    store: Arc<dyn CredentialStore>,
}

impl ResourceService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        session_user: UserId,
        request: CreateResourceRequest,
    ) -> Result<Resource, RequestError> {
        let resource = request.validate()?;
        ensure_owner(session_user, resource.user_id)?;
        Ok(self.store.create_resource(&resource).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, raw_id: &str) -> Result<ResourceDetails, RequestError> {
        let id: ResourceId = parse_id(raw_id)?;
        Ok(self
            .store
            .increment_views(id)
            .await?
            .ok_or(ValidationError::NotFound)?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_user_id(
        &self,
        raw_user_id: &str,
    ) -> Result<Vec<ResourceDetails>, RequestError> {
        let user_id: UserId = parse_id(raw_user_id)?;
        self.read_matching(ResourceFilter::ByUser(user_id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<ResourceDetails>, RequestError> {
        let department = required(Some(department.to_string()))?;
        self.read_matching(ResourceFilter::ByDepartment(department)).await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: Option<String>,
    ) -> Result<Vec<ResourceDetails>, RequestError> {
        let query = required(query)?;
        self.read_matching(ResourceFilter::Search(query)).await
    }

    async fn read_matching(
        &self,
        filter: ResourceFilter,
    ) -> Result<Vec<ResourceDetails>, RequestError> {
        let matched = self.store.increment_views_matching(&filter).await?;
        info!("{} resource(s) matched {filter:?}", matched.len());
        Ok(matched)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, session_user: UserId, raw_id: &str) -> Result<Resource, RequestError> {
        let id: ResourceId = parse_id(raw_id)?;
        let existing = self
            .store
            .find_resource(id)
            .await?
            .ok_or(ValidationError::NotFound)?;
        ensure_owner(session_user, existing.user_id)?;
        let deleted = self
            .store
            .delete_resource(id)
            .await?
            .ok_or(ValidationError::NotFound)?;
        info!("deleted resource {id}");
        Ok(deleted)
    }
}
