//! Authentication API integration tests
//!
//! Tests for register, login, profile, refresh-token and logout through the
//! assembled router.

use crate::common::*;
use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = test_app();

    let registered = register_user(&app, "Test User", "testuser@example.com", "password").await;
    assert_envelope!(registered, StatusCode::OK, true, "User created successfully");
    assert_absent!(registered.body, "token");

    let logged_in = login_user(&app, "testuser@example.com", "password").await;
    assert_envelope!(logged_in, StatusCode::OK, true, "User logged in successfully");
    let token = logged_in.token();

    let profile = call(&app, Method::GET, "/api/profile", Some(&token)).await;
    assert_envelope!(profile, StatusCode::OK, true, "Profile data");
    assert_eq!(
        profile.body["user"],
        json!({ "name": "Test User", "email": "testuser@example.com" })
    );

    let logout = call(&app, Method::GET, "/api/logout", Some(&token)).await;
    assert_envelope!(logout, StatusCode::OK, true, "User logged out successfully");

    let after = call(&app, Method::GET, "/api/profile", Some(&token)).await;
    assert_envelope!(after, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = test_app();
    register_user(&app, "Test User", "dup@example.com", "password").await;

    let duplicate = register_user(&app, "Other User", "dup@example.com", "secret").await;
    assert_envelope!(duplicate, StatusCode::UNPROCESSABLE_ENTITY, false, "Invalid user data");
    assert_eq!(
        duplicate.body["errors"]["email"],
        json!(["The email has already been taken."])
    );
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = test_app();

    let response = post_json(&app, "/api/register", json!({ "email": "not-an-email", "password": "pw" })).await;
    assert_envelope!(response, StatusCode::UNPROCESSABLE_ENTITY, false, "Invalid user data");

    let errors = &response.body["errors"];
    assert_eq!(errors["name"], json!(["The name field is required."]));
    assert_eq!(
        errors["email"],
        json!(["The email field must be a valid email address."])
    );
    assert_eq!(
        errors["password"],
        json!(["The password field must be at least 3 characters."])
    );
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = test_app();

    let response = post_raw(&app, "/api/register", "{ not json").await;
    assert_envelope!(response, StatusCode::UNPROCESSABLE_ENTITY, false, "Invalid user data");
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn test_login_validation_errors() {
    let app = test_app();

    let response = post_json(&app, "/api/login", json!({ "email": "" })).await;
    assert_envelope!(response, StatusCode::UNPROCESSABLE_ENTITY, false, "Validation errors");
    assert_eq!(
        response.body["errors"]["email"],
        json!(["The email field is required."])
    );
    assert_eq!(
        response.body["errors"]["password"],
        json!(["The password field is required."])
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app();
    register_user(&app, "Test User", "known@example.com", "password").await;

    let wrong_password = login_user(&app, "known@example.com", "wrong-password").await;
    let unknown_email = login_user(&app, "unknown@example.com", "password").await;

    assert_envelope!(wrong_password, StatusCode::UNAUTHORIZED, false, "Invalid login details");
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.status, unknown_email.status);
}

#[tokio::test]
async fn test_login_trims_email() {
    let app = test_app();
    register_user(&app, "Test User", "  spaced@example.com ", "password").await;

    let response = login_user(&app, "spaced@example.com", "password").await;
    assert_envelope!(response, StatusCode::OK, true, "User logged in successfully");
}

#[tokio::test]
async fn test_profile_without_token() {
    let app = test_app();

    let response = call(&app, Method::GET, "/api/profile", None).await;
    assert_envelope!(response, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_profile_with_forged_token() {
    let app = test_app();
    let token = registered_token(&app, "Test User", "forged@example.com", "password").await;

    // Same claims, different signing key
    let other = test_app_with(&test_config("another-secret"));
    let foreign = registered_token(&other, "Test User", "forged@example.com", "password").await;

    let response = call(&app, Method::GET, "/api/profile", Some(&foreign)).await;
    assert_envelope!(response, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");

    let mut tampered = token.clone();
    tampered.push('x');
    let response = call(&app, Method::GET, "/api/profile", Some(&tampered)).await;
    assert_envelope!(response, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_profile_for_user_from_another_store() {
    // Two apps share the secret but not the user store
    let issuer = test_app();
    let token = registered_token(&issuer, "Test User", "ghost@example.com", "password").await;

    let app = test_app();
    let response = call(&app, Method::GET, "/api/profile", Some(&token)).await;
    assert_envelope!(response, StatusCode::UNAUTHORIZED, false, "User not authenticated");
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let app = test_app();
    let token = registered_token(&app, "Test User", "refresh@example.com", "password").await;

    let refreshed = call(&app, Method::POST, "/api/refresh-token", Some(&token)).await;
    assert_envelope!(refreshed, StatusCode::OK, true, "New access token generated");
    let fresh = refreshed.token();
    assert_ne!(fresh, token);

    let with_fresh = call(&app, Method::GET, "/api/profile", Some(&fresh)).await;
    assert_envelope!(with_fresh, StatusCode::OK, true, "Profile data");

    let with_old = call(&app, Method::GET, "/api/profile", Some(&token)).await;
    assert_envelope!(with_old, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");

    let refresh_again = call(&app, Method::GET, "/api/refresh-token", Some(&token)).await;
    assert_envelope!(refresh_again, StatusCode::UNAUTHORIZED, false, "Token is invalid");
}

#[tokio::test]
async fn test_refresh_expired_token() {
    let app = test_app_with_expiring_tokens();
    let token = registered_token(&app, "Test User", "expired@example.com", "password").await;

    let response = call(&app, Method::GET, "/api/refresh-token", Some(&token)).await;
    assert_envelope!(
        response,
        StatusCode::UNAUTHORIZED,
        false,
        "Token has expired and can no longer be refreshed"
    );
    assert_absent!(response.body, "token");

    let profile = call(&app, Method::GET, "/api/profile", Some(&token)).await;
    assert_envelope!(profile, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = test_app();

    let response = call(&app, Method::GET, "/api/refresh-token", None).await;
    assert_envelope!(response, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let app = test_app();
    let token = registered_token(&app, "Test User", "twice@example.com", "password").await;

    let first = call(&app, Method::POST, "/api/logout", Some(&token)).await;
    assert_envelope!(first, StatusCode::OK, true, "User logged out successfully");

    let second = call(&app, Method::GET, "/api/logout", Some(&token)).await;
    assert_envelope!(second, StatusCode::OK, true, "User logged out successfully");
}

#[tokio::test]
async fn test_logout_accepts_unverifiable_token() {
    let app = test_app();

    let response = call(&app, Method::GET, "/api/logout", Some("garbage")).await;
    assert_envelope!(response, StatusCode::OK, true, "User logged out successfully");

    let missing = call(&app, Method::GET, "/api/logout", None).await;
    assert_envelope!(missing, StatusCode::UNAUTHORIZED, false, "Unauthenticated.");
}

#[tokio::test]
async fn test_logout_leaves_other_sessions_alone() {
    let app = test_app();
    let first = registered_token(&app, "Test User", "multi@example.com", "password").await;
    let second = login_user(&app, "multi@example.com", "password").await.token();

    call(&app, Method::GET, "/api/logout", Some(&first)).await;

    let response = call(&app, Method::GET, "/api/profile", Some(&second)).await;
    assert_envelope!(response, StatusCode::OK, true, "Profile data");
}
