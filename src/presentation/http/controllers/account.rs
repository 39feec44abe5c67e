// src/presentation/http/controllers/account.rs
use crate::application::{
    commands::account::{
        AddressCommand, ChangePasswordCommand, UpdateProfileCommand, UpdateSettingsCommand,
    },
    dto::{AddressDto, UserDto, UserSettingsDto},
};
use crate::domain::user::{AddressKind, PreferencesPatch};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use super::double_option;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `null` clears the stored number.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub date_of_birth: Option<Option<NaiveDate>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressRequest {
    #[serde(default)]
    pub address_type: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub country: String,
}

impl From<AddressRequest> for AddressCommand {
    fn from(request: AddressRequest) -> Self {
        Self {
            address_type: request.address_type,
            street: request.street,
            city: request.city,
            state: request.state,
            postal_code: request.postal_code,
            country: request.country,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[allow(clippy::struct_excessive_bools)]
pub struct UpdateSettingsRequest {
    pub receive_emails: Option<bool>,
    pub dark_mode: Option<bool>,
    pub show_email_publicly: Option<bool>,
    pub show_phone_number_publicly: Option<bool>,
    pub show_date_of_birth_publicly: Option<bool>,
    pub show_profile_image_publicly: Option<bool>,
    pub show_full_name_publicly: Option<bool>,
    pub show_last_login: Option<bool>,
    pub show_date_joined: Option<bool>,
}

impl From<UpdateSettingsRequest> for PreferencesPatch {
    fn from(request: UpdateSettingsRequest) -> Self {
        Self {
            receive_emails: request.receive_emails,
            dark_mode: request.dark_mode,
            show_email_publicly: request.show_email_publicly,
            show_phone_number_publicly: request.show_phone_number_publicly,
            show_date_of_birth_publicly: request.show_date_of_birth_publicly,
            show_profile_image_publicly: request.show_profile_image_publicly,
            show_full_name_publicly: request.show_full_name_publicly,
            show_last_login: request.show_last_login,
            show_date_joined: request.show_date_joined,
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/account",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated.", body = UserDto),
        (status = 400, description = "Invalid or empty update.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Email already registered.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn update_profile(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<UpdateProfileRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateProfileCommand {
        email: payload.email,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        date_of_birth: payload.date_of_birth,
    };

    state
        .services
        .account_commands
        .update_profile(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/account/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed.", body = StatusResponse),
        (status = 400, description = "Current password wrong or new password too weak.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn change_password(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<ChangePasswordRequest>,
) -> HttpResult<Json<StatusResponse>> {
    let command = ChangePasswordCommand {
        current_password: payload.current_password,
        new_password: payload.new_password,
    };

    state
        .services
        .account_commands
        .change_password(&user, command)
        .await
        .into_http()?;

    Ok(Json(StatusResponse::new("password_changed")))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/deactivate",
    responses(
        (status = 200, description = "Account deactivated.", body = UserDto)
    ),
    tag = "Account"
)]
pub async fn deactivate(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .account_commands
        .deactivate(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/account",
    responses(
        (status = 204, description = "Account, addresses and settings deleted.")
    ),
    tag = "Account"
)]
pub async fn delete_account(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<StatusCode> {
    state
        .services
        .account_commands
        .delete_account(&user)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/settings",
    responses(
        (status = 200, description = "Current settings, created with defaults on first access.", body = UserSettingsDto)
    ),
    tag = "Account"
)]
pub async fn get_settings(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<UserSettingsDto>> {
    state
        .services
        .user_queries
        .get_settings(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/account/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings updated.", body = UserSettingsDto),
        (status = 400, description = "No flag given.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn update_settings(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<UpdateSettingsRequest>,
) -> HttpResult<Json<UserSettingsDto>> {
    let command = UpdateSettingsCommand {
        patch: payload.into(),
    };

    state
        .services
        .account_commands
        .update_settings(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/account/addresses",
    responses(
        (status = 200, description = "Addresses of the caller.", body = Vec<AddressDto>)
    ),
    tag = "Account"
)]
pub async fn list_addresses(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<AddressDto>>> {
    state
        .services
        .user_queries
        .list_addresses(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/account/addresses",
    request_body = AddressRequest,
    responses(
        (status = 201, description = "Address added.", body = AddressDto),
        (status = 400, description = "Invalid address fields.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn add_address(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<AddressRequest>,
) -> HttpResult<(StatusCode, Json<AddressDto>)> {
    let address = state
        .services
        .account_commands
        .add_address(&user, payload.into())
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(address)))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address detail.", body = AddressDto),
        (status = 403, description = "Address belongs to another account.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Address not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn get_address(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<AddressDto>> {
    state
        .services
        .user_queries
        .get_address(&user, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/account/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Address replaced.", body = AddressDto),
        (status = 403, description = "Address belongs to another account.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn update_address(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AddressRequest>,
) -> HttpResult<Json<AddressDto>> {
    state
        .services
        .account_commands
        .update_address(&user, id, payload.into())
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/account/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 204, description = "Address deleted."),
        (status = 403, description = "Address belongs to another account.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn delete_address(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .account_commands
        .delete_address(&user, id)
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}
