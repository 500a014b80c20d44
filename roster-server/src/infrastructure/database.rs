use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    // No prepared-statement cache, so transaction-mode poolers work.
    let options = PgConnectOptions::from_str(database_url)?
        .statement_cache_capacity(0);

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_with(options)
        .await?;
    info!("connected to PostgreSQL");
    Ok(pool)
}

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            seq BIGSERIAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    // Tables created before `seq` existed get it backfilled here.
    sqlx::query("ALTER TABLE users ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL")
        .execute(pool)
        .await?;
    info!("users table ready");
    Ok(())
}
