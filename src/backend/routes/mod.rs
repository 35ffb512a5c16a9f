//! Routes Module
//!
//! HTTP route configuration.
//!
//! - **`router`** - Main router assembly (`create_router`)
//! - **`api_routes`** - Authentication endpoints under `/api`

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
