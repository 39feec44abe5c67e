// src/domain/user/address.rs
use crate::domain::errors::{DomainError, DomainResult, ensure_bounded, ensure_max_len};
use crate::domain::user::value_objects::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressId(pub i64);

impl AddressId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("address id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<AddressId> for i64 {
    fn from(value: AddressId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    #[default]
    Home,
    Work,
    Other,
}

impl AddressKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Work => "work",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "work" => Ok(Self::Work),
            "other" => Ok(Self::Other),
            other => Err(DomainError::Validation(format!(
                "unknown address type '{other}'"
            ))),
        }
    }
}

/// Validated postal fields of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub kind: AddressKind,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub country: String,
}

impl PostalAddress {
    pub fn new(
        kind: AddressKind,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: Option<String>,
        country: impl Into<String>,
    ) -> DomainResult<Self> {
        let street = street.into().trim().to_string();
        let city = city.into().trim().to_string();
        let state = state.into().trim().to_string();
        let country = country.into().trim().to_string();
        let postal_code = postal_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        ensure_bounded("street", &street, 255)?;
        ensure_bounded("city", &city, 100)?;
        ensure_bounded("state", &state, 100)?;
        ensure_bounded("country", &country, 100)?;
        if let Some(code) = &postal_code {
            ensure_max_len("postal code", code, 20)?;
        }

        Ok(Self {
            kind,
            street,
            city,
            state,
            postal_code,
            country,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub postal: PostalAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub user_id: UserId,
    pub postal: PostalAddress,
    pub created_at: DateTime<Utc>,
}
