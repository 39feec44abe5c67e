use crate::domain::user::{
    Address, AddressKind, Capability, Role, User, UserSettings,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::AuthenticatedUser;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let role = user.role();
        Self {
            id: user.id.into(),
            email: user.email.into(),
            first_name: user.details.first_name.into(),
            last_name: user.details.last_name.into(),
            phone_number: user.details.phone_number.map(Into::into),
            date_of_birth: user.details.date_of_birth,
            role,
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            date_joined: user.date_joined,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CapabilityView {
    pub resource: String,
    pub action: String,
}

impl From<Capability> for CapabilityView {
    fn from(value: Capability) -> Self {
        Self {
            resource: value.resource,
            action: value.action,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressDto {
    pub id: i64,
    pub address_type: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Address> for AddressDto {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.into(),
            address_type: address.postal.kind,
            street: address.postal.street,
            city: address.postal.city,
            state: address.postal.state,
            postal_code: address.postal.postal_code,
            country: address.postal.country,
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserSettingsDto {
    pub receive_emails: bool,
    pub dark_mode: bool,
    pub show_email_publicly: bool,
    pub show_phone_number_publicly: bool,
    pub show_date_of_birth_publicly: bool,
    pub show_profile_image_publicly: bool,
    pub show_full_name_publicly: bool,
    pub show_last_login: bool,
    pub show_date_joined: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSettings> for UserSettingsDto {
    fn from(settings: UserSettings) -> Self {
        let p = settings.preferences;
        Self {
            receive_emails: p.receive_emails,
            dark_mode: p.dark_mode,
            show_email_publicly: p.show_email_publicly,
            show_phone_number_publicly: p.show_phone_number_publicly,
            show_date_of_birth_publicly: p.show_date_of_birth_publicly,
            show_profile_image_publicly: p.show_profile_image_publicly,
            show_full_name_publicly: p.show_full_name_publicly,
            show_last_login: p.show_last_login,
            show_date_joined: p.show_date_joined,
            updated_at: settings.updated_at,
        }
    }
}

/// Everything the profile page shows about the caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub user: UserDto,
    pub addresses: Vec<AddressDto>,
    pub settings: UserSettingsDto,
    pub capabilities: Vec<CapabilityView>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

impl UserProfileDto {
    pub fn from_parts(
        user: User,
        addresses: Vec<Address>,
        settings: UserSettings,
        auth: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> Self {
        let mut capabilities: Vec<_> = auth
            .capabilities
            .iter()
            .cloned()
            .map(CapabilityView::from)
            .collect();
        capabilities.sort_by(|a, b| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.action.cmp(&b.action))
        });
        let expires_in = auth
            .expires_at
            .signed_duration_since(now)
            .num_seconds()
            .max(0);

        Self {
            user: user.into(),
            addresses: addresses.into_iter().map(Into::into).collect(),
            settings: settings.into(),
            capabilities,
            expires_at: auth.expires_at,
            expires_in,
        }
    }
}
