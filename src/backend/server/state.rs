/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The `AuthGateway`, which owns the user store, password hasher and
 *   token service
 * - The optional PostgreSQL pool, which `/health` pings
 *
 * Nothing in here is per-user: the gateway is stateless apart from the
 * user store and the revocation list, both of which handle concurrent
 * writers themselves.
 *
 * # Example
 *
 * ```rust
 * use authgate::backend::auth::AuthGateway;
 * use axum::extract::State;
 *
 * async fn handler(State(gateway): State<AuthGateway>) {
 *     let _ = gateway.profile(None).await;
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::gateway::AuthGateway;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication operations
    pub gateway: AuthGateway,

    /// Database connection pool
    ///
    /// This is `None` when `DATABASE_URL` is not set and the in-memory
    /// stores are in use.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(gateway: AuthGateway, db_pool: Option<PgPool>) -> Self {
        Self { gateway, db_pool }
    }
}

/// Implement FromRef for AuthGateway
///
/// This allows handlers to take `State<AuthGateway>` directly.
impl FromRef<AppState> for AuthGateway {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// Used by the health check.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
