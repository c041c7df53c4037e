use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tracing::info;

use crate::auth::middleware::require_auth;
use crate::server::constants::API_PREFIX;
use crate::server::handlers::{resources, status, users};
use crate::server::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    // Auth is layered per method: unsupported methods answer 405 without a token check.
    let auth = middleware::from_fn_with_state(state.clone(), require_auth);
    let api = Router::new()
        .route("/users/signup", post(users::sign_up))
        .route("/users/login", post(users::log_in))
        .route(
            "/users/edit",
            put(users::edit_profile).route_layer(auth.clone()),
        )
        .route(
            "/users/update-profile",
            put(users::update_profile_picture).route_layer(auth.clone()),
        )
        .route(
            "/users/update-social",
            put(users::update_social_links).route_layer(auth.clone()),
        )
        .route("/users/id/:id", get(users::get_by_id))
        .route("/users/email", get(users::get_by_email))
        .route("/users/username", get(users::get_by_username))
        .route(
            "/resources/create",
            post(resources::create).route_layer(auth.clone()),
        )
        .route(
            "/resources/id/:id",
            get(resources::get_by_id).merge(delete(resources::delete).route_layer(auth)),
        )
        .route("/resources/user/:user_id", get(resources::get_by_user_id))
        .route("/resources/search", get(resources::search))
        .route(
            "/resources/department/:department",
            get(resources::get_by_department),
        );
    Router::new()
        .route("/", get(status))
        .nest(API_PREFIX, api)
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.server.address.clone();
    let app = app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("starting server on: {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
