mod categories;
mod products;
mod service;
mod tags;

pub use products::ListProductsQuery;
pub use service::CatalogQueryService;
