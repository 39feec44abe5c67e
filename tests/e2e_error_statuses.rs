// tests/e2e_error_statuses.rs
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;

use support::{
    CUSTOMER_TOKEN, DEFAULT_PASSWORD, EXPIRED_TOKEN, InMemoryUserRepo, STAFF_TOKEN, TestApp,
    UserBuilder, assert_error_response, json_request, read_json,
};

#[tokio::test]
async fn weak_password_returns_400() {
    let app = support::make_test_router().await;

    let req = json_request(
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": "weak@example.com", "password": "abc", "first_name": "Weak" })),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn duplicate_email_in_other_case_returns_409() {
    let app = TestApp::with_users(InMemoryUserRepo::with_users(vec![
        UserBuilder::new(1).email("taken@example.com").build(),
    ]))
    .router();

    let req = json_request(
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "email": "TAKEN@example.com",
            "password": DEFAULT_PASSWORD,
            "first_name": "Copy"
        })),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn supplied_slug_already_in_use_returns_409() {
    let app = support::make_test_router().await;

    let create = |name: &str| {
        json_request(
            Method::POST,
            "/api/v1/tags",
            Some(STAFF_TOKEN),
            Some(json!({ "name": name, "slug": "featured" })),
        )
    };
    let resp = app.clone().oneshot(create("Featured")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(create("Highlighted")).await.unwrap();
    assert_error_response(resp, StatusCode::CONFLICT, "Conflict").await;
}

#[tokio::test]
async fn unknown_slug_returns_404() {
    let app = support::make_test_router().await;

    for uri in [
        "/api/v1/categories/by-slug/nowhere",
        "/api/v1/tags/by-slug/nothing",
        "/api/v1/products/by-slug/NOT%20A%20SLUG",
        "/api/v1/products?category=Not%20A%20Slug",
        "/api/v1/products?tag=%21%21%21",
        "/api/v1/products?tag=missing",
    ] {
        let req = json_request(Method::GET, uri, None, None);
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_error_response(resp, StatusCode::NOT_FOUND, "Not Found").await;
    }
}

#[tokio::test]
async fn non_positive_id_returns_400() {
    let app = support::make_test_router().await;

    let req = json_request(Method::DELETE, "/api/v1/tags/0", Some(STAFF_TOKEN), None);
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn invalid_cursor_returns_400() {
    let app = support::make_test_router().await;

    let req = json_request(Method::GET, "/api/v1/products?cursor=garbage!", None, None);
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn expired_token_returns_401() {
    let app = support::make_test_router().await;

    let req = json_request(Method::GET, "/api/v1/account/settings", Some(EXPIRED_TOKEN), None);
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "Unauthorized").await;
}

#[tokio::test]
async fn foreign_address_returns_403() {
    let app = TestApp::with_users(InMemoryUserRepo::with_users(vec![
        UserBuilder::new(1).build(),
        UserBuilder::new(2).build(),
    ]))
    .router();

    let req = json_request(
        Method::POST,
        "/api/v1/account/addresses",
        Some("test:2:customer"),
        Some(json!({ "street": "1 Elm St", "city": "Paris", "state": "IDF", "country": "FR" })),
    );
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let address = read_json(resp).await;

    let uri = format!("/api/v1/account/addresses/{}", address["id"]);
    let req = json_request(Method::GET, &uri, Some(CUSTOMER_TOKEN), None);
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::FORBIDDEN, "Forbidden").await;
}

#[tokio::test]
async fn empty_settings_patch_returns_400() {
    let app = TestApp::with_users(InMemoryUserRepo::with_users(vec![UserBuilder::new(1).build()]))
        .router();

    let req = json_request(
        Method::PUT,
        "/api/v1/account/settings",
        Some(CUSTOMER_TOKEN),
        Some(json!({})),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}

#[tokio::test]
async fn product_with_unknown_tag_returns_400() {
    let app = support::make_test_router().await;

    let req = json_request(
        Method::POST,
        "/api/v1/products",
        Some(STAFF_TOKEN),
        Some(json!({ "name": "Widget", "price": 100, "tag_ids": [77] })),
    );
    let resp = app.oneshot(req).await.unwrap();
    assert_error_response(resp, StatusCode::BAD_REQUEST, "Bad Request").await;
}
