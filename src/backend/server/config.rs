/**
 * Server Configuration
 *
 * Database connection and migration at startup.
 *
 * Without `DATABASE_URL` the server runs on in-memory stores. When a URL
 * is configured, failing to connect or migrate aborts startup instead of
 * quietly falling back: accounts written to memory would vanish on the next
 * restart.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

/// Maximum pooled connections
const MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Database startup errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to run database migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Ok(None)` if no database URL is configured
/// - `Ok(Some(pool))` once connected and migrated
pub async fn load_database(database_url: Option<&str>) -> Result<Option<PgPool>, DatabaseError> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Users and revoked tokens will be kept in memory.");
        return Ok(None);
    };

    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(Some(pool))
}
