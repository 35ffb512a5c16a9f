//! Authentication test helpers
//!
//! Builds the application over in-memory stores and sends requests to it
//! without binding a socket.

use authgate::backend::auth::{
    AuthGateway, MemoryRevocationList, MemoryUserStore, PasswordHasher, TokenService,
};
use authgate::backend::routes::router::create_router;
use authgate::backend::server::{build_state, AppState};
use authgate::shared::AuthConfig;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Signing secret used by every test application
pub const TEST_SECRET: &str = "integration-test-secret";

/// Lowest bcrypt cost, keeps hashing fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Configuration for a test application signing with `secret`
pub fn test_config(secret: &str) -> AuthConfig {
    AuthConfig::builder()
        .jwt_secret(secret)
        .bcrypt_cost(TEST_BCRYPT_COST)
        .token_ttl(Duration::from_secs(3600))
        .build()
        .expect("valid test configuration")
}

/// Application over fresh in-memory stores
pub fn test_app() -> Router {
    test_app_with(&test_config(TEST_SECRET))
}

/// Application whose tokens expire the moment they are issued
///
/// Configuration refuses a zero lifetime, so the gateway is assembled by hand.
pub fn test_app_with_expiring_tokens() -> Router {
    let tokens = TokenService::new(
        TEST_SECRET.as_bytes(),
        Duration::ZERO,
        Arc::new(MemoryRevocationList::new()),
    );
    let gateway = AuthGateway::new(
        Arc::new(MemoryUserStore::new()),
        PasswordHasher::new(TEST_BCRYPT_COST).expect("valid bcrypt cost"),
        tokens,
    );
    create_router(AppState::new(gateway, None))
}

/// Application over fresh in-memory stores with a custom configuration
pub fn test_app_with(config: &AuthConfig) -> Router {
    create_router(build_state(config, None).expect("test state"))
}

/// Application over PostgreSQL-backed stores using `pool`
pub fn test_app_with_pool(pool: PgPool) -> Router {
    create_router(build_state(&test_config(TEST_SECRET), Some(pool)).expect("test state"))
}

/// Status code and parsed JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `token` member, panicking if absent
    pub fn token(&self) -> String {
        self.body["token"]
            .as_str()
            .unwrap_or_else(|| panic!("Expected a token in {}", self.body))
            .to_string()
    }
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Send a request and collect the response
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };

    TestResponse { status, body }
}

/// POST a JSON body
pub async fn post_json(app: &Router, uri: &str, body: Value) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(app, request).await
}

/// POST a raw body with a JSON content type
pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("valid request");
    send(app, request).await
}

/// Send a bodiless request, optionally with a bearer token
pub async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    send(app, builder.body(Body::empty()).expect("valid request")).await
}

/// Register a user through the API
pub async fn register_user(app: &Router, name: &str, email: &str, password: &str) -> TestResponse {
    post_json(
        app,
        "/api/register",
        json!({ "name": name, "email": email, "password": password }),
    )
    .await
}

/// Log in through the API
pub async fn login_user(app: &Router, email: &str, password: &str) -> TestResponse {
    post_json(
        app,
        "/api/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

/// Register and log in, returning the issued token
pub async fn registered_token(app: &Router, name: &str, email: &str, password: &str) -> String {
    let registered = register_user(app, name, email, password).await;
    assert_eq!(registered.status, StatusCode::OK, "{}", registered.body);

    let logged_in = login_user(app, email, password).await;
    assert_eq!(logged_in.status, StatusCode::OK, "{}", logged_in.body);
    logged_in.token()
}
