//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! dt-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! Connection settings are the same ones the web binary reads:
//! `DELIVERIES_DATABASE_URL` (or `DATABASE_URL`), or the discrete
//! `DELIVERIES_DB_*` parameters.
//!
//! # Migration Files
//!
//! `crates/web/migrations/`

use delivery_tracker_web::config::{ConfigError, DatabaseConfig};
use delivery_tracker_web::db::create_pool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Connection settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the delivery store migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the settings are incomplete, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!("Connecting to delivery database...");
    let pool = create_pool(&config).await?;

    tracing::info!("Running delivery migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Delivery migrations complete!");
    Ok(())
}
