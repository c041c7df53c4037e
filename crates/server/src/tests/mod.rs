use std::sync::Arc;

use crate::config::{AppConfig, AuthConfig, ServerConfig};
use crate::database::connection::DbConfig;
use crate::models::resource::CreateResourceRequest;
use crate::models::user::{SignUpRequest, SocialLinkInput};
use crate::models::IdParam;
use crate::server::state::AppState;

use self::memory::MemoryStore;

mod users;

pub const TEST_SECRET: &str = "portal-test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            address: "127.0.0.1:0".to_string(),
        },
        database: DbConfig::development("portal_db", "portal_guest", "portalpass"),
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
        },
    }
}

pub fn memory_state() -> (Arc<MemoryStore>, Arc<AppState>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::with_store(&test_config(), store.clone());
    (store, Arc::new(state))
}

pub fn link(name: &str) -> SocialLinkInput {
    SocialLinkInput {
        name: Some(name.to_string()),
        icon_url: Some(format!("https://icons/{name}.svg")),
        url: Some(format!("https://{name}.com/someone")),
    }
}

pub fn sign_up_request(email: &str, username: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        name: Some("Some Student".to_string()),
        email: Some(email.to_string()),
        phonenumber: Some("+10000000".to_string()),
        profile_pic: Some("https://pics/default.png".to_string()),
        password: Some(password.to_string()),
        username: Some(username.to_string()),
        sociallinks: Some(vec![link("github")]),
    }
}

pub fn resource_request(
    user_id: i64,
    title: &str,
    description: &str,
    department: &str,
) -> CreateResourceRequest {
    CreateResourceRequest {
        name: Some("notes.pdf".to_string()),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        tags: Some("lecture,notes".to_string()),
        department: Some(department.to_string()),
        user_id: Some(IdParam::Number(user_id)),
        category: Some("lecture".to_string()),
        filepath: Some(format!("/uploads/{title}.pdf")),
    }
}
