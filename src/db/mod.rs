//! Postgres access for the flashcard store.
//!
//! One shared pool backs everything: flashcard CRUD, the list query
//! builder and the daily quota accounting. Sessions are pinned to UTC
//! because the quota's day boundary is defined at UTC midnight.

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

pub type DbPool = PgPool;

/// Embedded migrations, shared with the test harness
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the connection pool described by `config`
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(Some(config.idle_timeout))
        .max_lifetime(Some(config.max_lifetime))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Quota day-window arithmetic assumes UTC on both sides
                sqlx::query("SET timezone = 'UTC'").execute(conn).await?;
                Ok(())
            })
        })
        .connect(&config.url)
        .await?;

    log::info!(
        "Connected to Postgres ({}..{} connections)",
        config.min_connections,
        config.max_connections
    );

    Ok(pool)
}

/// Brings the schema up to date; a no-op when nothing is pending
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    log::info!("Schema is up to date");
    Ok(())
}

/// One round-trip liveness probe, used by the readiness endpoint
pub async fn ping(pool: &DbPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}
