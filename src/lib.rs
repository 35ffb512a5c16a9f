//! authgate - Bearer-token authentication API
//!
//! User registration, credential login issuing a signed token, profile
//! lookup, token refresh and logout, served over an Axum JSON API.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration and the validation error map
//! - **`backend`** - The authentication core and its HTTP layer
//!
//! # Usage
//!
//! ```rust,no_run
//! use authgate::backend::server::create_app;
//! use authgate::shared::AuthConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Sessions
//!
//! There is no server-side session. Every request that needs an identity
//! presents a bearer token, which is verified on the spot. The only shared
//! state besides the user store is the list of revoked token IDs.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, `thiserror` enums per layer
//! - `AuthError` from the gateway, wrapped in `BackendError` at the HTTP edge

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
