use std::sync::Arc;

use crate::auth::token::TokenIssuer;
use crate::config::AppConfig;
use crate::database::store::CredentialStore;
use crate::services::resources::ResourceService;
use crate::services::users::UserService;

pub struct AppState {
    pub config: AppConfig,
    pub tokens: Arc<TokenIssuer>,
    pub users: UserService,
    pub resources: ResourceService,
}

impl AppState {
    pub fn with_store(config: &AppConfig, store: Arc<dyn CredentialStore>) -> Self {
        let tokens = Arc::new(TokenIssuer::new(config.auth.jwt_secret.as_bytes()));
        Self {
            config: config.clone(),
            users: UserService::new(store.clone(), tokens.clone()),
            resources: ResourceService::new(store),
            tokens,
        }
    }
}
