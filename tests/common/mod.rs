//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory application built from the real router
//! - Request helpers driving it through `tower::ServiceExt::oneshot`
//! - PostgreSQL fixtures, used when `DATABASE_URL` is set
//! - Custom assertion macros

pub mod auth_helpers;
pub mod database;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
