//! HTTP-level integration tests for registration, login and RBAC.

mod common;

use axum::http::StatusCode;
use cardb_api::auth::jwt::{generate_token_at, TOKEN_LIFETIME_HOURS};
use cardb_core::roles::Role;
use chrono::{Duration, Utc};
use common::{
    admin_token, body_json, build_test_app, get, get_auth, login, post_json, user_token,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with the account summary and never the hash.
#[tokio::test]
async fn test_register_success() {
    let test = build_test_app().await;
    let body = json!({ "username": "alice", "password": "secret123" });
    let response = post_json(test.app(), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["role"], "USER");
    assert!(json["id"].is_number());
    assert!(json.get("password_hash").is_none());
}

/// A second registration with the same username is rejected and creates nothing.
#[tokio::test]
async fn test_register_duplicate_username() {
    let test = build_test_app().await;
    let body = json!({ "username": "alice", "password": "secret123" });
    let first = post_json(test.app(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(test.app(), "/api/v1/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(second).await["code"], "DUPLICATE_USERNAME");

    // Seeded admin plus alice.
    assert_eq!(test.state.store.count_accounts().await.unwrap(), 2);
}

/// Usernames are case-sensitive.
#[tokio::test]
async fn test_register_usernames_are_case_sensitive() {
    let test = build_test_app().await;
    for name in ["alice", "Alice"] {
        let body = json!({ "username": name, "password": "secret123" });
        let response = post_json(test.app(), "/api/v1/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

/// Short passwords and empty usernames fail validation.
#[tokio::test]
async fn test_register_validation() {
    let test = build_test_app().await;

    let short = json!({ "username": "bob", "password": "12345" });
    let response = post_json(test.app(), "/api/v1/auth/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let empty = json!({ "username": "", "password": "secret123" });
    let response = post_json(test.app(), "/api/v1/auth/register", empty).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns a token, the username, the role and its lifetime.
#[tokio::test]
async fn test_login_success() {
    let test = build_test_app().await;
    let body = json!({ "username": "admin", "password": "admin123" });
    let response = post_json(test.app(), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["username"], "admin");
    assert_eq!(json["role"], "ADMIN");
    assert_eq!(json["expires_in"], TOKEN_LIFETIME_HOURS * 3600);
}

/// Unknown username and wrong password produce identical responses.
#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let test = build_test_app().await;

    let wrong_password = post_json(
        test.app(),
        "/api/v1/auth/login",
        json!({ "username": "admin", "password": "not-the-password" }),
    )
    .await;
    let unknown_user = post_json(
        test.app(),
        "/api/v1/auth/login",
        json!({ "username": "ghost", "password": "admin123" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a, b);
    assert_eq!(a["code"], "INVALID_CREDENTIALS");
}

/// A registered user can log in and receives the USER role.
#[tokio::test]
async fn test_registered_user_can_login() {
    let test = build_test_app().await;
    let token = user_token(&test, "carol").await;

    let claims = test.state.credentials.validate_token(&token).unwrap();
    assert_eq!(claims.sub, "carol");
    assert_eq!(claims.role, Role::User);
}

// ---------------------------------------------------------------------------
// Token checks
// ---------------------------------------------------------------------------

/// Protected routes reject requests without a token.
#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let test = build_test_app().await;
    let response = get(test.app(), "/api/v1/cars").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

/// A garbage token is rejected with 401.
#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let test = build_test_app().await;
    let response = get_auth(test.app(), "/api/v1/cars", "not.a.token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token whose two-hour window has passed is rejected with 401.
#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let test = build_test_app().await;
    let issued_at = Utc::now() - Duration::hours(TOKEN_LIFETIME_HOURS) - Duration::seconds(1);
    let issued =
        generate_token_at("admin", Role::Admin, &test.state.config.jwt, issued_at).unwrap();

    let response = get_auth(test.app(), "/api/v1/cars", &issued.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

/// USER accounts may use car routes but not admin routes.
#[tokio::test]
async fn test_user_is_forbidden_from_admin_routes() {
    let test = build_test_app().await;
    let token = user_token(&test, "dave").await;

    let cars = get_auth(test.app(), "/api/v1/cars", &token).await;
    assert_eq!(cars.status(), StatusCode::OK);

    let users = get_auth(test.app(), "/api/v1/admin/users", &token).await;
    assert_eq!(users.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(users).await["code"], "FORBIDDEN");
}

/// ADMIN accounts reach both car and admin routes.
#[tokio::test]
async fn test_admin_reaches_everything() {
    let test = build_test_app().await;
    let token = admin_token(&test).await;

    let cars = get_auth(test.app(), "/api/v1/cars", &token).await;
    assert_eq!(cars.status(), StatusCode::OK);

    let users = get_auth(test.app(), "/api/v1/admin/users", &token).await;
    assert_eq!(users.status(), StatusCode::OK);
}

/// Login works the same for a second, independent login of the same account.
#[tokio::test]
async fn test_each_login_issues_distinct_token() {
    let test = build_test_app().await;
    let a = login(test.app(), "admin", "admin123").await;
    let b = login(test.app(), "admin", "admin123").await;
    assert_ne!(a, b);
}
