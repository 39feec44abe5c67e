// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_address;
mod postgres_category;
mod postgres_product;
mod postgres_settings;
mod postgres_tag;
mod postgres_user;

pub use error::map_sqlx;
pub use postgres_address::PostgresAddressRepository;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_product::PostgresProductRepository;
pub use postgres_settings::PostgresUserSettingsRepository;
pub use postgres_tag::PostgresTagRepository;
pub use postgres_user::PostgresUserRepository;
