// src/presentation/http/controllers/mod.rs
pub mod account;
pub mod auth;
pub mod categories;
pub mod products;
pub mod tags;
pub mod users;

use serde::{Deserialize, Deserializer};

pub(crate) const fn default_limit() -> u32 {
    20
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
