/**
 * Router Configuration
 *
 * Combines the API routes with a health probe, a JSON 404 fallback and
 * request tracing into the final router.
 */

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::backend::auth::handlers::types::ApiResponse;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// - `GET /health` - Liveness probe; `503` when a configured database
///   does not answer
/// - `/api/*` - Authentication endpoints (see `api_routes`)
/// - anything else - `404` with the standard envelope
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health(State(db_pool): State<Option<PgPool>>) -> (StatusCode, Json<ApiResponse>) {
    let Some(pool) = db_pool else {
        return (StatusCode::OK, Json(ApiResponse::success("ok")));
    };

    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (StatusCode::OK, Json(ApiResponse::success("ok"))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::failure("Database unavailable")),
            )
        }
    }
}

async fn not_found() -> (StatusCode, Json<ApiResponse>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::failure("Not Found")))
}
