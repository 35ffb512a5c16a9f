/**
 * Authentication Handler Types
 *
 * Request bodies and the response envelope shared by every authentication
 * endpoint.
 *
 * # Envelope
 *
 * Every response carries `status` and `message`. Successful responses may
 * add `token` or `user`; failures may add `errors` (field → messages) or
 * `error` (a single string). Absent members are omitted from the JSON.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::gateway::{LoginInput, ProfileView, RegisterInput};
use crate::shared::error::ValidationErrors;

/// Registration request
///
/// Fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a parse failure.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password (hashed before storage)
    #[serde(default)]
    pub password: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password (verified against the stored hash)
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginInput {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Response envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ProfileView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    fn new(status: bool, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            token: None,
            user: None,
            errors: None,
            error: None,
        }
    }

    /// `status: true` envelope
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    /// `status: false` envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user(mut self, user: ProfileView) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
