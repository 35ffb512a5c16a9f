//! Integration tests against the assembled router
