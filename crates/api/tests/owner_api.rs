//! HTTP-level integration tests for the `/owners` resource.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, create_car, create_owner, delete_auth, get_auth,
    post_json_auth, put_json_auth, user_token,
};
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_owner_with_cars() {
    let test = build_test_app().await;
    let token = user_token(&test, "erin").await;
    let owner_id = create_owner(&test, &token, "John", "Doe").await;
    create_car(
        &test,
        &token,
        json!({
            "brand": "Toyota", "model": "Corolla", "color": "Red",
            "year": 2020, "price": 20000, "owner_id": owner_id,
        }),
    )
    .await;

    let response = get_auth(test.app(), &format!("/api/v1/owners/{owner_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let owner = body_json(response).await;
    assert_eq!(owner["first_name"], "John");
    assert_eq!(owner["cars"].as_array().unwrap().len(), 1);
    assert_eq!(owner["cars"][0]["brand"], "Toyota");
    assert!(owner["cars"][0].get("owner").is_none(), "cars must not nest the owner");
}

#[tokio::test]
async fn test_list_owners() {
    let test = build_test_app().await;
    let token = user_token(&test, "erin").await;
    create_owner(&test, &token, "John", "Doe").await;
    create_owner(&test, &token, "Jane", "Roe").await;

    let response = get_auth(test.app(), "/api/v1/owners", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let owners = body_json(response).await;
    assert_eq!(owners.as_array().unwrap().len(), 2);
    assert_eq!(owners[1]["last_name"], "Roe");
    assert_eq!(owners[1]["cars"], json!([]));
}

#[tokio::test]
async fn test_create_owner_rejects_blank_names() {
    let test = build_test_app().await;
    let token = user_token(&test, "erin").await;

    let body = json!({ "first_name": " ", "last_name": "Doe" });
    let response = post_json_auth(test.app(), "/api/v1/owners", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_replace_owner() {
    let test = build_test_app().await;
    let token = user_token(&test, "erin").await;
    let owner_id = create_owner(&test, &token, "John", "Doe").await;

    let body = json!({ "first_name": "Johnny", "last_name": "Dough" });
    let uri = format!("/api/v1/owners/{owner_id}");
    let response = put_json_auth(test.app(), &uri, body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let owner = body_json(get_auth(test.app(), &uri, &token).await).await;
    assert_eq!(owner["first_name"], "Johnny");

    let missing = put_json_auth(test.app(), "/api/v1/owners/999", body, &token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

/// Only administrators may delete owners.
#[tokio::test]
async fn test_delete_owner_requires_admin() {
    let test = build_test_app().await;
    let token = user_token(&test, "erin").await;
    let owner_id = create_owner(&test, &token, "John", "Doe").await;

    let response = delete_auth(test.app(), &format!("/api/v1/owners/{owner_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An owner that still owns cars is kept (409); after its cars are gone it can
/// be deleted.
#[tokio::test]
async fn test_delete_owner_is_restricted() {
    let test = build_test_app().await;
    let admin = admin_token(&test).await;
    let owner_id = create_owner(&test, &admin, "John", "Doe").await;
    let car = create_car(
        &test,
        &admin,
        json!({
            "brand": "Toyota", "model": "Corolla", "color": "Red",
            "year": 2020, "price": 20000, "owner_id": owner_id,
        }),
    )
    .await;
    let owner_uri = format!("/api/v1/owners/{owner_id}");

    let blocked = delete_auth(test.app(), &owner_uri, &admin).await;
    assert_eq!(blocked.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(blocked).await["code"], "CONFLICT");
    assert_eq!(
        get_auth(test.app(), &owner_uri, &admin).await.status(),
        StatusCode::OK
    );

    let car_uri = format!("/api/v1/cars/{}", car["id"]);
    assert_eq!(
        delete_auth(test.app(), &car_uri, &admin).await.status(),
        StatusCode::NO_CONTENT
    );

    let deleted = delete_auth(test.app(), &owner_uri, &admin).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(test.app(), &owner_uri, &admin).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
