/**
 * Register Handler
 *
 * POST /api/register
 *
 * # Registration Process
 *
 * 1. Validate name, email and password together
 * 2. Hash the password with bcrypt
 * 3. Create the user (the store enforces email uniqueness)
 *
 * No token is issued; the client logs in separately.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::gateway::AuthGateway;
use crate::backend::auth::handlers::types::{ApiResponse, RegisterRequest};
use crate::backend::error::{BackendError, Operation};

/// Register handler
///
/// # Errors
///
/// * `422 Unprocessable Entity` - Any field fails validation, or the email is taken
/// * `500 Internal Server Error` - Hashing or the user store failed
///
/// # Example Request
///
/// ```http
/// POST /api/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Test User", "email": "a@b.com", "password": "password" }
/// ```
///
/// # Example Response
///
/// ```json
/// { "status": true, "message": "User created successfully" }
/// ```
pub async fn register(
    State(gateway): State<AuthGateway>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, BackendError> {
    let Json(request) = payload
        .map_err(|e| BackendError::invalid_body(Operation::Register, e.body_text()))?;

    gateway
        .register(request.into())
        .await
        .map_err(|e| BackendError::auth(Operation::Register, e))?;

    Ok(Json(ApiResponse::success("User created successfully")))
}
