/**
 * Login Handler
 *
 * POST /api/login
 *
 * Verifies an email/password pair and returns a signed bearer token.
 * An unknown email and a wrong password produce the same 401 response.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::{ApiResponse, LoginRequest};
use crate::backend::error::{BackendError, Operation};

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `422 Unprocessable Entity` - Email or password fails validation
/// * `500 Internal Server Error` - Store, hashing or signing failed
///
/// # Example Response
///
/// ```json
/// {
///   "status": true,
///   "message": "User logged in successfully",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
pub async fn login(
    State(gateway): State<AuthGateway>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, BackendError> {
    let Json(request) =
        payload.map_err(|e| BackendError::invalid_body(Operation::Login, e.body_text()))?;

    let issued = gateway
        .login(request.into())
        .await
        .map_err(|e| BackendError::auth(Operation::Login, e))?;

    Ok(Json(
        ApiResponse::success("User logged in successfully").with_token(issued.token),
    ))
}
