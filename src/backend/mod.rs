//! Backend Module
//!
//! Server-side code: the authentication core and the Axum HTTP layer around
//! it.
//!
//! # Architecture
//!
//! - **`auth`** - Credential store, password hashing, tokens, the
//!   `AuthGateway`, and the HTTP handlers
//! - **`server`** - Application state, database setup, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`middleware`** - Bearer token extraction
//! - **`error`** - `BackendError` and its HTTP response mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Server binary
//! ├── auth/       - Authentication core and handlers
//! ├── server/     - Server initialization and state
//! ├── routes/     - Route configuration
//! ├── middleware/ - Request extraction helpers
//! └── error/      - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! request → handler → AuthGateway → UserStore / PasswordHasher / TokenService
//!                                 ↓
//!          envelope ← BackendError (status table) or success body
//! ```
//!
//! # Thread Safety
//!
//! - `AuthGateway` is `Clone` and shared by every handler
//! - The in-memory stores use `tokio::sync::RwLock`; the PostgreSQL stores
//!   rely on table constraints
//! - bcrypt work runs on the blocking pool

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use auth::AuthGateway;
pub use error::BackendError;
pub use server::create_app;
