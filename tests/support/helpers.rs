// tests/support/helpers.rs
use std::sync::Arc;

use super::builders::UserBuilder;
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use bazaar_core::application::services::{ApplicationServices, ServiceDependencies};
use bazaar_core::presentation::http::{routes, state::HttpState};
use serde_json::Value;

/// Services wired to in-memory adapters, with handles on each repository so
/// tests can seed and inspect state.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub users: Arc<mocks::InMemoryUserRepo>,
    pub addresses: Arc<mocks::InMemoryAddressRepo>,
    pub settings: Arc<mocks::InMemorySettingsRepo>,
    pub categories: Arc<mocks::InMemoryCategoryRepo>,
    pub tags: Arc<mocks::InMemoryTagRepo>,
    pub products: Arc<mocks::InMemoryProductRepo>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_users(mocks::InMemoryUserRepo::new())
    }

    /// Seeds the accounts behind [`mocks::CUSTOMER_TOKEN`],
    /// [`mocks::STAFF_TOKEN`] and [`mocks::SUPERUSER_TOKEN`].
    pub fn with_token_accounts() -> Self {
        Self::with_users(mocks::InMemoryUserRepo::with_users(vec![
            UserBuilder::new(1).build(),
            UserBuilder::new(2).staff().build(),
            UserBuilder::new(3).superuser().build(),
        ]))
    }

    pub fn with_users(users: mocks::InMemoryUserRepo) -> Self {
        Self::with_repos(users, mocks::InMemorySettingsRepo::new())
    }

    pub fn with_repos(users: mocks::InMemoryUserRepo, settings: mocks::InMemorySettingsRepo) -> Self {
        let settings = Arc::new(settings);
        let users = Arc::new(users.with_settings(Arc::clone(&settings)));
        let addresses = Arc::new(mocks::InMemoryAddressRepo::new());
        let categories = Arc::new(mocks::InMemoryCategoryRepo::new());
        let tags = Arc::new(mocks::InMemoryTagRepo::new());
        let products = Arc::new(mocks::InMemoryProductRepo::new());

        let services = Arc::new(ApplicationServices::new(ServiceDependencies {
            user_repo: users.clone(),
            address_repo: addresses.clone(),
            settings_repo: settings.clone(),
            category_repo: categories.clone(),
            tag_repo: tags.clone(),
            product_repo: products.clone(),
            password_hasher: Arc::new(mocks::StrictPasswordHasher),
            token_manager: Arc::new(mocks::DummyTokenManager),
            clock: Arc::new(mocks::TickingClock::default()),
            slugger: Arc::new(mocks::CountingSlug::default()),
        }));

        Self {
            services,
            users,
            addresses,
            settings,
            categories,
            tags,
            products,
        }
    }

    pub fn state(&self) -> HttpState {
        HttpState {
            services: Arc::clone(&self.services),
        }
    }

    pub fn router(&self) -> axum::Router {
        routes::build_router_with_rate_limiter(self.state(), false)
    }
}

pub async fn build_test_state() -> HttpState {
    TestApp::with_token_accounts().state()
}

pub async fn make_test_router() -> axum::Router {
    TestApp::with_token_accounts().router()
}

/// Build a JSON request, optionally with a bearer token.
pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let body_bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body_bytes).expect("expected valid json body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(resp: axum::response::Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts.headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {}", ct);
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {}", err_field);
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
