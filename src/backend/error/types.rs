/**
 * Backend Error Types
 *
 * `BackendError` is what an HTTP handler returns when an operation fails.
 * It pairs the failure with the operation that raised it, because the
 * response message for the same failure kind differs per endpoint (an
 * expired token is "Unauthenticated." on the profile route but has its own
 * message on the refresh route).
 *
 * # Status Code Table
 *
 * | Failure              | Status |
 * |----------------------|--------|
 * | `Validation`         | 422    |
 * | `DuplicateEmail`     | 422    |
 * | malformed body       | 422    |
 * | `InvalidCredentials` | 401    |
 * | `InvalidToken`       | 401    |
 * | `ExpiredToken`       | 401    |
 * | `Unauthenticated`    | 401    |
 * | `UnknownUser`        | 401    |
 * | `Internal`           | 500    |
 */

use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::backend::auth::gateway::AuthError;
use crate::backend::auth::handlers::types::ApiResponse;
use crate::backend::auth::validation::EMAIL_TAKEN;
use crate::shared::error::ValidationErrors;

/// The endpoint an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    Profile,
    RefreshToken,
    Logout,
}

impl Operation {
    /// Message used when an operation fails for an unexpected reason
    fn internal_failure_message(self) -> &'static str {
        match self {
            Self::Register => "An error occurred while creating the user",
            Self::Login => "An error occurred during login",
            Self::Profile => "An error occurred during get Profile",
            Self::RefreshToken => "Could not refresh the token",
            Self::Logout => "Could not log the user out",
        }
    }

    /// Message used when input fails validation
    fn validation_message(self) -> &'static str {
        match self {
            Self::Register => "Invalid user data",
            _ => "Validation errors",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Profile => "profile",
            Self::RefreshToken => "refresh token",
            Self::Logout => "logout",
        };
        f.write_str(name)
    }
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// An authentication operation failed
    #[error("{operation} failed: {source}")]
    Auth {
        operation: Operation,
        #[source]
        source: AuthError,
    },

    /// The request body could not be parsed
    #[error("{operation} failed: invalid request body: {message}")]
    InvalidBody {
        operation: Operation,
        message: String,
    },
}

impl BackendError {
    /// Wrap an authentication failure
    pub fn auth(operation: Operation, source: AuthError) -> Self {
        Self::Auth { operation, source }
    }

    /// Create a body parsing error
    pub fn invalid_body(operation: Operation, message: impl Into<String>) -> Self {
        Self::InvalidBody {
            operation,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth { source, .. } => match source {
                AuthError::Validation(_) | AuthError::DuplicateEmail => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                AuthError::InvalidCredentials
                | AuthError::InvalidToken
                | AuthError::ExpiredToken
                | AuthError::Unauthenticated
                | AuthError::UnknownUser => StatusCode::UNAUTHORIZED,
                AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidBody { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Build the response envelope for this error
    pub fn body(&self) -> ApiResponse {
        match self {
            Self::Auth { operation, source } => auth_body(*operation, source),
            Self::InvalidBody { operation, message } => {
                ApiResponse::failure(operation.validation_message()).with_error(message.clone())
            }
        }
    }
}

fn auth_body(operation: Operation, error: &AuthError) -> ApiResponse {
    match error {
        AuthError::Validation(errors) => {
            ApiResponse::failure(operation.validation_message()).with_errors(errors.clone())
        }
        AuthError::DuplicateEmail => ApiResponse::failure(operation.validation_message())
            .with_errors(ValidationErrors::single("email", EMAIL_TAKEN)),
        AuthError::InvalidCredentials => ApiResponse::failure("Invalid login details"),
        AuthError::InvalidToken if operation == Operation::RefreshToken => {
            ApiResponse::failure("Token is invalid")
        }
        AuthError::ExpiredToken if operation == Operation::RefreshToken => {
            ApiResponse::failure("Token has expired and can no longer be refreshed")
        }
        AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::Unauthenticated => {
            ApiResponse::failure("Unauthenticated.")
        }
        AuthError::UnknownUser => ApiResponse::failure("User not authenticated"),
        AuthError::Internal(message) => {
            ApiResponse::failure(operation.internal_failure_message()).with_error(message.clone())
        }
    }
}
