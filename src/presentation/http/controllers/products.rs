// src/presentation/http/controllers/products.rs
use crate::application::{
    commands::catalog::{CreateProductCommand, UpdateProductCommand},
    dto::{CursorPage, ProductDto},
    queries::catalog::ListProductsQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::ProductListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::{default_limit, double_option};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// Tag slug.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Minor currency units.
    pub price: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable)]
    pub category_id: Option<Option<i64>>,
    /// Replaces the whole tag set when present.
    pub tag_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Page of products, newest first.", body = ProductListResponse),
        (status = 400, description = "Invalid cursor.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Catalog"
)]
pub async fn list_products(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<ProductListParams>,
) -> HttpResult<Json<CursorPage<ProductDto>>> {
    let query = ListProductsQuery {
        limit: params.limit,
        cursor: params.cursor,
        category: params.category,
        tag: params.tag,
        include_inactive: params.include_inactive,
    };

    state
        .services
        .catalog_queries
        .list_products(actor.as_ref(), query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/by-slug/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product detail.", body = ProductDto),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security((), ("bearerAuth" = [])),
    tag = "Catalog"
)]
pub async fn get_product_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
) -> HttpResult<Json<ProductDto>> {
    state
        .services
        .catalog_queries
        .get_product_by_slug(actor.as_ref(), &slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created.", body = ProductDto),
        (status = 400, description = "Invalid fields, unknown category or tags.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Caller lacks catalog:write.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn create_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateProductRequest>,
) -> HttpResult<(StatusCode, Json<ProductDto>)> {
    let command = CreateProductCommand {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        price: payload.price,
        category_id: payload.category_id,
        tag_ids: payload.tag_ids,
        is_active: payload.is_active,
    };

    let product = state
        .services
        .catalog_commands
        .create_product(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated.", body = ProductDto),
        (status = 404, description = "Product not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn update_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let command = UpdateProductCommand {
        name: payload.name,
        slug: payload.slug,
        description: payload.description,
        price: payload.price,
        category_id: payload.category_id,
        tag_ids: payload.tag_ids,
        is_active: payload.is_active,
    };

    state
        .services
        .catalog_commands
        .update_product(&user, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/regenerate-slug",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with a fresh slug.", body = ProductDto)
    ),
    tag = "Catalog"
)]
pub async fn regenerate_product_slug(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ProductDto>> {
    state
        .services
        .catalog_commands
        .regenerate_product_slug(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted.")
    ),
    tag = "Catalog"
)]
pub async fn delete_product(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .catalog_commands
        .delete_product(&user, id)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
