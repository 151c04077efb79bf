#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cardb_api::auth::jwt::JwtConfig;
use cardb_api::config::ServerConfig;
use cardb_api::router::build_app_router;
use cardb_api::seed;
use cardb_api::state::AppState;
use cardb_db::memory::MemoryStore;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        password_min_length: 6,
        seed_admin: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            issuer: "cardb-api".to_string(),
            audience: "cardb-client".to_string(),
        },
    }
}

/// A router over a fresh in-memory store, plus the state behind it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Clone of the router for a single `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router (same middleware stack as production)
/// over an empty [`MemoryStore`], with the administrator account seeded.
pub async fn build_test_app() -> TestApp {
    let config = test_config();
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    seed::ensure_admin(&state.credentials, ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .expect("seeding admin should succeed");

    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect and parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Log in via the API and return the session token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed for {username}");
    body_json(response).await["token"]
        .as_str()
        .expect("login response must contain a token")
        .to_string()
}

/// Register a `USER` account via the API and log it in.
pub async fn user_token(test: &TestApp, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": "user123" });
    let response = post_json(test.app(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), 201, "registration should succeed");
    login(test.app(), username, "user123").await
}

pub async fn admin_token(test: &TestApp) -> String {
    login(test.app(), ADMIN_USERNAME, ADMIN_PASSWORD).await
}

/// Create an owner via the API and return its id.
pub async fn create_owner(test: &TestApp, token: &str, first: &str, last: &str) -> i64 {
    let body = serde_json::json!({ "first_name": first, "last_name": last });
    let response = post_json_auth(test.app(), "/api/v1/owners", body, token).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a car via the API and return the response JSON.
pub async fn create_car(test: &TestApp, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(test.app(), "/api/v1/cars", body, token).await;
    assert_eq!(response.status(), 201);
    body_json(response).await
}
