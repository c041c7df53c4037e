use std::env;
use std::fs::read_to_string;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::connection::DbConfig;

const JWT_SECRET_VAR: &str = "JWT_SECRET";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DbConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_yaml_file<P: Into<PathBuf>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.into();
        let content = read_to_string(&path).with_context(|| format!("path: {path:?}"))?;
        let mut config = Self::from_yaml_str(&content)?;
        if let Ok(secret) = env::var(JWT_SECRET_VAR) {
            info!("using token secret from {JWT_SECRET_VAR}");
            config.auth.jwt_secret = secret;
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        anyhow::ensure!(
            !config.auth.jwt_secret.is_empty(),
            "auth.jwt_secret must not be empty"
        );
        Ok(config)
    }
}
