// src/presentation/http/routes.rs
use crate::config::AppConfig;
use crate::presentation::http::middleware::rate_limit::auth_rate_limit_layer;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{account, auth, categories, products, tags, users},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, patch, post, put},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState) -> Router {
    build_router_with_rate_limiter(state, true)
}

/// Full application router. Tests pass `false` for `rate_limit`, since the
/// limiter keys on the peer address that `oneshot` requests do not carry.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limit: bool) -> Router {
    let mut auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login));
    if let Some(layer) = rate_limit.then(auth_rate_limit_layer).flatten() {
        auth_routes = auth_routes.layer(layer);
    }

    Router::new()
        .merge(openapi::docs_router())
        .merge(auth_routes)
        .route("/health", get(health))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/account",
            patch(account::update_profile).delete(account::delete_account),
        )
        .route(
            "/api/v1/account/change-password",
            post(account::change_password),
        )
        .route("/api/v1/account/deactivate", post(account::deactivate))
        .route(
            "/api/v1/account/settings",
            get(account::get_settings).put(account::update_settings),
        )
        .route(
            "/api/v1/account/addresses",
            get(account::list_addresses).post(account::add_address),
        )
        .route(
            "/api/v1/account/addresses/{id}",
            get(account::get_address)
                .put(account::update_address)
                .delete(account::delete_address),
        )
        .route("/api/v1/users", get(users::list_users))
        .route("/api/v1/users/{id}", patch(users::update_user))
        .route(
            "/api/v1/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/v1/categories/by-slug/{slug}",
            get(categories::get_category_by_slug),
        )
        .route(
            "/api/v1/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/v1/categories/{id}/regenerate-slug",
            post(categories::regenerate_category_slug),
        )
        .route("/api/v1/tags", get(tags::list_tags).post(tags::create_tag))
        .route("/api/v1/tags/by-slug/{slug}", get(tags::get_tag_by_slug))
        .route(
            "/api/v1/tags/{id}",
            put(tags::update_tag).delete(tags::delete_tag),
        )
        .route(
            "/api/v1/tags/{id}/regenerate-slug",
            post(tags::regenerate_tag_slug),
        )
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/v1/products/by-slug/{slug}",
            get(products::get_product_by_slug),
        )
        .route(
            "/api/v1/products/{id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route(
            "/api/v1/products/{id}/regenerate-slug",
            post(products::regenerate_product_slug),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&AppConfig::allowed_origins_from_env()))
        .layer(Extension(state))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse::new("ok"))
}
