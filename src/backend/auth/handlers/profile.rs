/**
 * Profile Handler
 *
 * GET /api/profile
 *
 * Resolves the bearer token to its user and returns the public part of the
 * record: name and email only.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::ApiResponse;
use crate::backend::error::{BackendError, Operation};
use crate::backend::middleware::BearerToken;

/// Profile handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing, invalid, expired or revoked token, or the
///   token's user no longer exists
/// * `500 Internal Server Error` - The user store failed
///
/// # Example Response
///
/// ```json
/// {
///   "status": true,
///   "message": "Profile data",
///   "user": { "name": "Test User", "email": "a@b.com" }
/// }
/// ```
pub async fn profile(
    State(gateway): State<AuthGateway>,
    token: BearerToken,
) -> Result<Json<ApiResponse>, BackendError> {
    let user = gateway
        .profile(token.as_deref())
        .await
        .map_err(|e| BackendError::auth(Operation::Profile, e))?;

    Ok(Json(ApiResponse::success("Profile data").with_user(user)))
}
