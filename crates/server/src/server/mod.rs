use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::connection::DbConnection;
use crate::server::state::AppState;

pub mod constants;
pub mod handlers;
pub mod router;
pub mod state;

pub async fn run_all(config: &AppConfig, init_schema: bool) -> anyhow::Result<()> {
    let db_connection = DbConnection::connect(&config.database).await?;
    if init_schema {
        db_connection.init_schema().await?;
    }
    let app_state = Arc::new(AppState::with_store(config, Arc::new(db_connection)));
    router::serve(app_state).await?;
    Ok(())
}
