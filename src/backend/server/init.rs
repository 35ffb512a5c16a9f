/**
 * Server Initialization
 *
 * Builds the application state and router from an `AuthConfig`.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL if configured (migrations included)
 * 2. Pick the user store and revocation list to match
 * 3. Build the `AuthGateway` (the password hasher prepares its dummy hash)
 * 4. Start the periodic purge of expired revocation entries
 * 5. Create the router
 */

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::password::{HashError, PasswordHasher};
use crate::backend::auth::sessions::{
    MemoryRevocationList, PgRevocationList, RevocationList, TokenService,
};
use crate::backend::auth::users::{MemoryUserStore, PgUserStore, UserStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, DatabaseError};
use crate::backend::server::state::AppState;
use crate::shared::config::AuthConfig;

/// How often expired revocation entries are purged
const PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Server startup errors
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("failed to prepare password hasher: {0}")]
    Hasher(#[from] HashError),
}

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when a configured database cannot be reached or migrated, or when
/// bcrypt rejects the configured cost.
pub async fn create_app(config: &AuthConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing authentication server");

    let db_pool = load_database(config.database_url.as_deref()).await?;
    // bcrypt work for the dummy hash stays off the async workers
    let state_config = config.clone();
    let app_state = tokio::task::spawn_blocking(move || build_state(&state_config, db_pool))
        .await
        .map_err(HashError::from)??;

    spawn_revocation_purge(app_state.gateway.tokens().clone(), PURGE_INTERVAL);

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic revocation purge");

    Ok(app)
}

/// Assemble the application state over the given pool
///
/// With no pool, users and revoked tokens live in memory.
pub fn build_state(config: &AuthConfig, db_pool: Option<PgPool>) -> Result<AppState, HashError> {
    let (users, revocations): (Arc<dyn UserStore>, Arc<dyn RevocationList>) = match &db_pool {
        Some(pool) => (
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgRevocationList::new(pool.clone())),
        ),
        None => (
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryRevocationList::new()),
        ),
    };

    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl, revocations);
    let hasher = PasswordHasher::new(config.bcrypt_cost)?;

    tracing::info!(
        "Token lifetime {}s, bcrypt cost {}",
        config.token_ttl.as_secs(),
        config.bcrypt_cost
    );

    Ok(AppState::new(AuthGateway::new(users, hasher, tokens), db_pool))
}

/// Periodically drop revocation entries whose tokens have expired
pub fn spawn_revocation_purge(tokens: TokenService, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match tokens.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!("Purged {} expired revocation entries", purged),
                Err(e) => tracing::error!("Failed to purge revocation entries: {}", e),
            }
        }
    })
}
