/**
 * Auth Gateway
 *
 * Orchestrates the five authentication operations over the credential
 * store, password hasher and token service. Every operation is a single
 * request/response cycle: the gateway holds no per-user state, and the
 * caller passes the presented bearer token in explicitly.
 *
 * Failures come back as `AuthError` values; mapping them to status codes
 * and response bodies is the HTTP layer's job.
 */

use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::password::{HashError, PasswordHasher};
use crate::backend::auth::sessions::{
    IssuedToken, MemoryRevocationList, TokenError, TokenService,
};
use crate::backend::auth::users::{MemoryUserStore, NewUser, StoreError, UserStore};
use crate::backend::auth::validation::{
    required_email, required_min_length, EMAIL_TAKEN, MIN_NAME_LEN, MIN_PASSWORD_LEN,
};
use crate::shared::config::AuthConfig;
use crate::shared::error::ValidationErrors;

/// Authentication failure kinds
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request input broke one or more field rules
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The store rejected the email as already registered
    #[error("email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; the two are indistinguishable
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("expired token")]
    ExpiredToken,

    /// No bearer token was presented
    #[error("unauthenticated")]
    Unauthenticated,

    /// The token verified but its user no longer exists
    #[error("token subject does not exist")]
    UnknownUser,

    /// Store, hashing or signing infrastructure failed
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::DuplicateEmail,
            StoreError::Backend(message) => Self::Internal(message),
        }
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::InvalidToken,
            TokenError::Expired => Self::ExpiredToken,
            TokenError::Internal(message) => Self::Internal(message),
        }
    }
}

/// Registration input as received; absent fields are `None`
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login input as received
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The only user fields a profile lookup exposes
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
}

/// Authentication operations
#[derive(Clone)]
pub struct AuthGateway {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthGateway {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Build a gateway over in-memory user and revocation stores
    pub fn in_memory(config: &AuthConfig) -> Result<Self, HashError> {
        let tokens = TokenService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
            Arc::new(MemoryRevocationList::new()),
        );
        Ok(Self::new(
            Arc::new(MemoryUserStore::new()),
            PasswordHasher::new(config.bcrypt_cost)?,
            tokens,
        ))
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new user
    ///
    /// All field violations are reported together. The email uniqueness
    /// pre-check only improves the error report; the store's `create` is
    /// what actually guarantees one user per email.
    pub async fn register(&self, input: RegisterInput) -> Result<(), AuthError> {
        let mut errors = ValidationErrors::new();

        let name = required_min_length(
            &mut errors,
            "name",
            input.name.as_deref().map(str::trim),
            MIN_NAME_LEN,
        );
        let email = required_email(&mut errors, "email", input.email.as_deref().map(str::trim));
        if let Some(email) = &email {
            if self.users.find_by_email(email).await?.is_some() {
                errors.add("email", EMAIL_TAKEN);
            }
        }
        let password = required_min_length(
            &mut errors,
            "password",
            input.password.as_deref(),
            MIN_PASSWORD_LEN,
        );

        let (name, email, password) = match (name, email, password) {
            (Some(name), Some(email), Some(password)) if errors.is_empty() => {
                (name, email, password)
            }
            _ => return Err(AuthError::Validation(errors)),
        };

        let password_hash = self.hasher.hash(&password).await?;

        let user = self
            .users
            .create(NewUser {
                name,
                email,
                password_hash,
            })
            .await?;

        tracing::info!("User created successfully: {}", user.id);
        Ok(())
    }

    /// Check credentials and issue a token
    pub async fn login(&self, input: LoginInput) -> Result<IssuedToken, AuthError> {
        let mut errors = ValidationErrors::new();
        let email = required_email(&mut errors, "email", input.email.as_deref().map(str::trim));
        let password = required_min_length(
            &mut errors,
            "password",
            input.password.as_deref(),
            MIN_PASSWORD_LEN,
        );

        let (email, password) = match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => (email, password),
            _ => return Err(AuthError::Validation(errors)),
        };

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.hasher.verify_against_dummy(&password).await?;
            tracing::warn!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, &user.password_hash).await? {
            tracing::warn!("Login rejected: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.id)?;
        tracing::info!("User logged in successfully: {}", user.id);
        Ok(issued)
    }

    /// Resolve a bearer token to the user's public profile
    pub async fn profile(&self, token: Option<&str>) -> Result<ProfileView, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let user_id = self.tokens.verify(token).await.map_err(|e| {
            tracing::warn!("Profile request with rejected token: {}", e);
            AuthError::from(e)
        })?;

        let user = self.users.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::warn!("Token subject not found: {}", user_id);
            AuthError::UnknownUser
        })?;

        Ok(ProfileView {
            name: user.name,
            email: user.email,
        })
    }

    /// Exchange a valid token for a new one
    pub async fn refresh_token(&self, token: Option<&str>) -> Result<IssuedToken, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let issued = self.tokens.refresh(token).await.map_err(|e| {
            tracing::warn!("Token refresh refused: {}", e);
            AuthError::from(e)
        })?;

        tracing::info!("Token refreshed for user {}", issued.subject);
        Ok(issued)
    }

    /// Invalidate the presented token
    ///
    /// Succeeds for any presented token, including ones that are already
    /// expired or invalid.
    pub async fn logout(&self, token: Option<&str>) -> Result<(), AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        self.tokens.invalidate(token).await?;
        tracing::info!("User logged out successfully");
        Ok(())
    }
}
