use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use super::PostgresConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Opens the connection pool described by `config`.
pub async fn connect(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Opens the pool, retrying with backoff while the server is unreachable.
///
/// `None` uses [`RetryConfig::default`].
pub async fn connect_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(|| connect(config.clone()), retry_config.unwrap_or_default()).await
}

/// Applies pending migrations so the schema matches the entity definitions.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!("{}: synchronizing database schema", app_name);

    M::up(db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    info!("{}: database schema is up to date", app_name);
    Ok(())
}

/// Drops every table the migrator knows about and recreates them empty.
pub async fn reset_schema<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    warn!("Dropping and recreating all tables");

    M::fresh(db)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    info!("Database cleared");
    Ok(())
}
