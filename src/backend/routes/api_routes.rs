/**
 * API Route Configuration
 *
 * Authentication endpoints under `/api`.
 *
 * # Routes
 *
 * - `POST /api/register` - Public, creates a user
 * - `POST /api/login` - Public, returns a bearer token
 * - `GET /api/profile` - Bearer token, returns `{ name, email }`
 * - `GET|POST /api/refresh-token` - Bearer token, returns a new token
 * - `GET|POST /api/logout` - Bearer token, revokes it
 *
 * Token checks happen inside the gateway, not in a route layer, so every
 * route shares one state type and no request carries an ambient user.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{login, logout, profile, refresh_token, register};
use crate::backend::server::state::AppState;

pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/profile", get(profile))
        .route("/api/refresh-token", get(refresh_token).post(refresh_token))
        .route("/api/logout", get(logout).post(logout))
}
