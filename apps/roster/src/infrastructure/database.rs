//! Connection pool and schema bootstrap

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::domain::repositories::RepositoryResult;

/// Opens a pool with foreign keys enforced
///
/// In-memory pools keep their single connection alive for the lifetime of
/// the pool; closing it would drop the database.
pub async fn connect(config: &DatabaseConfig) -> RepositoryResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
    if config.is_in_memory() {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::debug!("Connected to database: {}", config.url);
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &SqlitePool) -> RepositoryResult<()> {
    tracing::debug!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Connects and migrates in one step
pub async fn connect_and_migrate(config: &DatabaseConfig) -> RepositoryResult<SqlitePool> {
    let pool = connect(config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
