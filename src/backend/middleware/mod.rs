//! Middleware Module
//!
//! Request processing shared by the authentication endpoints.
//!
//! - **`auth`** - Bearer token extraction from the `Authorization` header

pub mod auth;

pub use auth::{extract_bearer_token, BearerToken};
