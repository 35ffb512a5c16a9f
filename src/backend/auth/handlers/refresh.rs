/**
 * Refresh Token Handler
 *
 * GET /api/refresh-token
 *
 * Trades a still-valid token for a new one. The presented token is revoked
 * as part of the exchange.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::ApiResponse;
use crate::backend::error::{BackendError, Operation};
use crate::backend::middleware::BearerToken;

/// Refresh token handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing, invalid or expired token
/// * `500 Internal Server Error` - Signing or the revocation store failed
pub async fn refresh_token(
    State(gateway): State<AuthGateway>,
    token: BearerToken,
) -> Result<Json<ApiResponse>, BackendError> {
    let issued = gateway
        .refresh_token(token.as_deref())
        .await
        .map_err(|e| BackendError::auth(Operation::RefreshToken, e))?;

    Ok(Json(
        ApiResponse::success("New access token generated").with_token(issued.token),
    ))
}
