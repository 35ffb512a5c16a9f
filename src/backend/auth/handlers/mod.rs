//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints. Each handler unpacks the
//! request, calls one `AuthGateway` operation, and wraps the outcome in the
//! response envelope.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request types and the response envelope
//! ├── register.rs - POST /api/register
//! ├── login.rs    - POST /api/login
//! ├── profile.rs  - GET /api/profile
//! ├── refresh.rs  - GET /api/refresh-token
//! └── logout.rs   - GET /api/logout
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Profile handler
pub mod profile;

/// Token refresh handler
pub mod refresh;

/// Logout handler
pub mod logout;

// Re-export commonly used types
pub use types::{ApiResponse, LoginRequest, RegisterRequest};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use profile::profile;
pub use refresh::refresh_token;
pub use register::register;
