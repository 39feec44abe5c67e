// src/presentation/http/controllers/tags.rs
use crate::application::{
    commands::catalog::{CreateTagCommand, UpdateTagCommand},
    dto::TagDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tags",
    responses(
        (status = 200, description = "All tags ordered by name.", body = Vec<TagDto>)
    ),
    security(()),
    tag = "Catalog"
)]
pub async fn list_tags(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<TagDto>>> {
    state
        .services
        .catalog_queries
        .list_tags()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/tags/by-slug/{slug}",
    params(("slug" = String, Path, description = "Tag slug")),
    responses(
        (status = 200, description = "Tag detail.", body = TagDto),
        (status = 404, description = "Tag not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(()),
    tag = "Catalog"
)]
pub async fn get_tag_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .catalog_queries
        .get_tag_by_slug(&slug)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created.", body = TagDto),
        (status = 403, description = "Caller lacks catalog:write.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Name or slug already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn create_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateTagRequest>,
) -> HttpResult<(StatusCode, Json<TagDto>)> {
    let command = CreateTagCommand {
        name: payload.name,
        slug: payload.slug,
    };

    let tag = state
        .services
        .catalog_commands
        .create_tag(&user, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    put,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    request_body = UpdateTagRequest,
    responses(
        (status = 200, description = "Tag updated.", body = TagDto),
        (status = 404, description = "Tag not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Name or slug already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn update_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTagRequest>,
) -> HttpResult<Json<TagDto>> {
    let command = UpdateTagCommand {
        name: payload.name,
        slug: payload.slug,
    };

    state
        .services
        .catalog_commands
        .update_tag(&user, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/tags/{id}/regenerate-slug",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag with a fresh slug.", body = TagDto)
    ),
    tag = "Catalog"
)]
pub async fn regenerate_tag_slug(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<TagDto>> {
    state
        .services
        .catalog_commands
        .regenerate_tag_slug(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/tags/{id}",
    params(("id" = i64, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted.")
    ),
    tag = "Catalog"
)]
pub async fn delete_tag(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .catalog_commands
        .delete_tag(&user, id)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
