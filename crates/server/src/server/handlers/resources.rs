use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::debug;

use crate::auth::middleware::SessionUser;
use crate::error::RequestError;
use crate::models::resource::{
    CreateResourceRequest, Resource, ResourceDetails, ResourceResponse, ResourcesResponse,
    SearchQuery,
};
use crate::server::handlers::JsonBody;
use crate::server::state::AppState;

pub async fn create(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    JsonBody(request): JsonBody<CreateResourceRequest>,
) -> Result<Json<ResourceResponse<Resource>>, RequestError> {
    debug!("resource upload requested by user {user_id}");
    let resource = state.resources.create(user_id, request).await?;
    Ok(Json(ResourceResponse { resource }))
}

pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse<ResourceDetails>>, RequestError> {
    let resource = state.resources.get_by_id(&id).await?;
    Ok(Json(ResourceResponse { resource }))
}

pub async fn get_by_user_id(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ResourcesResponse>, RequestError> {
    let resources = state.resources.get_by_user_id(&user_id).await?;
    Ok(Json(ResourcesResponse { resources }))
}

pub async fn get_by_department(
    State(state): State<Arc<AppState>>,
    Path(department): Path<String>,
) -> Result<Json<ResourcesResponse>, RequestError> {
    let resources = state.resources.get_by_department(&department).await?;
    Ok(Json(ResourcesResponse { resources }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ResourcesResponse>, RequestError> {
    let resources = state.resources.search(query.q).await?;
    Ok(Json(ResourcesResponse { resources }))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse<Resource>>, RequestError> {
    debug!("resource deletion requested by user {user_id}");
    let resource = state.resources.delete(user_id, &id).await?;
    Ok(Json(ResourceResponse { resource }))
}
