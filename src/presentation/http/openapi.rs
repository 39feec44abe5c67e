// src/presentation/http/openapi.rs
use crate::application::dto::{CursorPage, ProductDto, UserDto};
use axum::{Router, response::Redirect, routing::get};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_SNAPSHOT_PATH: &str = "docs/openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub items: Vec<UserDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::auth::register,
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::account::update_profile,
        crate::presentation::http::controllers::account::change_password,
        crate::presentation::http::controllers::account::deactivate,
        crate::presentation::http::controllers::account::delete_account,
        crate::presentation::http::controllers::account::get_settings,
        crate::presentation::http::controllers::account::update_settings,
        crate::presentation::http::controllers::account::list_addresses,
        crate::presentation::http::controllers::account::add_address,
        crate::presentation::http::controllers::account::get_address,
        crate::presentation::http::controllers::account::update_address,
        crate::presentation::http::controllers::account::delete_address,
        crate::presentation::http::controllers::users::list_users,
        crate::presentation::http::controllers::users::update_user,
        crate::presentation::http::controllers::categories::list_categories,
        crate::presentation::http::controllers::categories::get_category_by_slug,
        crate::presentation::http::controllers::categories::create_category,
        crate::presentation::http::controllers::categories::update_category,
        crate::presentation::http::controllers::categories::regenerate_category_slug,
        crate::presentation::http::controllers::categories::delete_category,
        crate::presentation::http::controllers::tags::list_tags,
        crate::presentation::http::controllers::tags::get_tag_by_slug,
        crate::presentation::http::controllers::tags::create_tag,
        crate::presentation::http::controllers::tags::update_tag,
        crate::presentation::http::controllers::tags::regenerate_tag_slug,
        crate::presentation::http::controllers::tags::delete_tag,
        crate::presentation::http::controllers::products::list_products,
        crate::presentation::http::controllers::products::get_product_by_slug,
        crate::presentation::http::controllers::products::create_product,
        crate::presentation::http::controllers::products::update_product,
        crate::presentation::http::controllers::products::regenerate_product_slug,
        crate::presentation::http::controllers::products::delete_product
    ),
    components(
        schemas(
            StatusResponse,
            UserListResponse,
            ProductListResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::RegisterRequest,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::account::UpdateProfileRequest,
            crate::presentation::http::controllers::account::ChangePasswordRequest,
            crate::presentation::http::controllers::account::AddressRequest,
            crate::presentation::http::controllers::account::UpdateSettingsRequest,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::presentation::http::controllers::categories::CreateCategoryRequest,
            crate::presentation::http::controllers::categories::UpdateCategoryRequest,
            crate::presentation::http::controllers::tags::CreateTagRequest,
            crate::presentation::http::controllers::tags::UpdateTagRequest,
            crate::presentation::http::controllers::products::CreateProductRequest,
            crate::presentation::http::controllers::products::UpdateProductRequest,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto,
            crate::application::dto::UserSettingsDto,
            crate::application::dto::AddressDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::CapabilityView,
            crate::application::dto::CategoryDto,
            crate::application::dto::CategoryDetailDto,
            crate::application::dto::TagDto,
            crate::application::dto::ProductDto,
            crate::domain::user::AddressKind,
            crate::domain::user::Role
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and the caller's profile"),
        (name = "Account", description = "Self-service account, address and settings endpoints"),
        (name = "Users", description = "Staff user administration"),
        (name = "Catalog", description = "Categories, tags and products"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Bazaar API",
        description = "Catalog and account backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if !urls.iter().any(|url| url == "http://localhost:8080") {
            urls.push("http://localhost:8080".to_string());
        }

        let mut seen = HashSet::new();
        for url in urls {
            if seen.insert(url.clone()) {
                servers.push(Server::new(url));
            }
        }
    }
}

/// Swagger UI at `/docs` (which also serves `/openapi.json`) and Redoc at
/// `/redoc`.
pub fn docs_router() -> Router {
    let openapi = ApiDoc::openapi();
    let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi.clone());
    let redoc = Redoc::with_url("/redoc", openapi);
    Router::new()
        .merge(swagger)
        .merge(redoc)
        .route("/", get(|| async { Redirect::permanent("/docs") }))
}

/// Write the pretty-printed document to `OPENAPI_SNAPSHOT_PATH`, falling back
/// to [`DEFAULT_SNAPSHOT_PATH`]. Returns the path written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(output_path)
}

impl From<CursorPage<UserDto>> for UserListResponse {
    fn from(page: CursorPage<UserDto>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}

impl From<CursorPage<ProductDto>> for ProductListResponse {
    fn from(page: CursorPage<ProductDto>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}
