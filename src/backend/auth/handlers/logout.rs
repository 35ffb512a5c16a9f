/**
 * Logout Handler
 *
 * GET /api/logout
 *
 * Revokes the presented token. Any presented token is accepted, including
 * one that is already expired or was never valid.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::ApiResponse;
use crate::backend::error::{BackendError, Operation};
use crate::backend::middleware::BearerToken;

/// Logout handler
///
/// # Errors
///
/// * `401 Unauthorized` - No token was presented
/// * `500 Internal Server Error` - The revocation store failed
pub async fn logout(
    State(gateway): State<AuthGateway>,
    token: BearerToken,
) -> Result<Json<ApiResponse>, BackendError> {
    gateway
        .logout(token.as_deref())
        .await
        .map_err(|e| BackendError::auth(Operation::Logout, e))?;

    Ok(Json(ApiResponse::success("User logged out successfully")))
}
