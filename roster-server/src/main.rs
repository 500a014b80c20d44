mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use application::user_service::UserService;
use application::workflow_relay::WorkflowRelay;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, ensure_schema};
use infrastructure::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    if config.webhook.is_none() {
        tracing::warn!("N8N_WEBHOOK_URL/N8N_WEBHOOK_SECRET not set, workflow relay disabled");
    }

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    ensure_schema(&pool)
        .await
        .context("failed to prepare users table")?;

    let user_repo = Arc::new(PostgresUserRepository::new(pool));
    let user_service = UserService::new(user_repo);
    let relay = WorkflowRelay::new(config.webhook.clone()).context("failed to build HTTP client")?;

    presentation::routes::start_server(config, user_service, relay).await?;
    Ok(())
}
