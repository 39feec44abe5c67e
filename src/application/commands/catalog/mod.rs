mod categories;
mod products;
mod service;
mod slug;
mod tags;

pub use categories::{CreateCategoryCommand, UpdateCategoryCommand};
pub use products::{CreateProductCommand, UpdateProductCommand};
pub use service::CatalogCommandService;
pub use tags::{CreateTagCommand, UpdateTagCommand};
