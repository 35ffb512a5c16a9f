//! Authentication Module
//!
//! User registration, credential checks, and the bearer-token lifecycle.
//!
//! # Architecture
//!
//! - **`users`** - User record and the `UserStore` credential store
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - JWT issue / verify / refresh / invalidate and the
//!   revocation list
//! - **`validation`** - Field rules for registration and login input
//! - **`gateway`** - `AuthGateway`, orchestrating the five operations
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → validated → hashed → stored
//! 2. **Login**: email, password → verified → token returned
//! 3. **Profile**: token → verified → `{ name, email }` returned
//! 4. **Refresh**: valid token → new token returned, old token revoked
//! 5. **Logout**: token → revoked
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt; hashes never leave the store layer
//! - Tokens are HS256 JWTs; there is no server-side session
//! - Unknown email and wrong password return the same 401
//!
//! # Example
//!
//! ```rust,no_run
//! use authgate::backend::auth::AuthGateway;
//! use authgate::shared::AuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::builder().jwt_secret("change-me").build()?;
//! let gateway = AuthGateway::in_memory(&config)?;
//! let profile = gateway.profile(Some("eyJhbGciOi...")).await;
//! # Ok(())
//! # }
//! ```

/// User data model and credential stores
pub mod users;

/// Password hashing
pub mod password;

/// JWT token management
pub mod sessions;

/// Input validation rules
pub mod validation;

/// Authentication operations
pub mod gateway;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use gateway::{AuthError, AuthGateway, LoginInput, ProfileView, RegisterInput};
pub use handlers::{login, logout, profile, refresh_token, register};
pub use password::PasswordHasher;
pub use sessions::{
    IssuedToken, MemoryRevocationList, PgRevocationList, RevocationList, TokenError, TokenService,
};
pub use users::{MemoryUserStore, PgUserStore, StoreError, User, UserStore};
