//! Database migration command.
//!
//! Applies the embedded migrations from `crates/web/migrations/` to
//! `BISTRO_DATABASE_URL`, creating the `SQLite` file if needed.

use thiserror::Error;

use bistro_web::config::ConfigError;
use bistro_web::db;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database cannot be opened or a migration
/// fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = super::load_config()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
