//! Shared Module
//!
//! Types that are independent of the HTTP layer: configuration and the
//! field-level validation error map that travels from the authentication
//! core out to the response envelope.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::ValidationErrors;
pub use config::{AuthConfig, AuthConfigBuilder, ConfigError};
