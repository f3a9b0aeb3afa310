//! Connection setup and schema migration.

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::config::AppConfig;

/// Open a connection pool for `config.database_url`.
///
/// An in-memory SQLite database only lives as long as its connection, so
/// such URLs always get a single-connection pool.
#[tracing::instrument(skip(config))]
pub async fn connect(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let max_connections = if config.database_url.contains(":memory:") {
        1
    } else {
        config.max_connections
    };
    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.max_connections(max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opts).await?;
    tracing::info!(max_connections, "Connected to database");
    Ok(db)
}

/// Apply every pending migration.
#[tracing::instrument(skip(db))]
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(db).await?.len();
    Migrator::up(db, None).await?;
    tracing::info!(applied = pending, "Database schema is up to date");
    Ok(())
}
