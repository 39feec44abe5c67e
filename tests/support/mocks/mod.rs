// tests/support/mocks/mod.rs
//! In-memory adapters for every application port.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod catalog_repos;
pub mod security;
pub mod time;
pub mod user_repos;
pub mod util;

pub use time::{DummyClock, TickingClock, fixed_now};

pub use security::{
    BrokenPasswordHasher, CUSTOMER_TOKEN, DummyPasswordHasher, DummyTokenManager, EXPIRED_TOKEN,
    STAFF_TOKEN, SUPERUSER_TOKEN, StrictPasswordHasher, token_for,
};

pub use util::{CountingSlug, ScriptedSlug};

pub use user_repos::{InMemoryAddressRepo, InMemorySettingsRepo, InMemoryUserRepo};

pub use catalog_repos::{InMemoryCategoryRepo, InMemoryProductRepo, InMemoryTagRepo, RacedSlugs};
