pub mod category;
pub mod product;
pub mod repository;
pub mod tag;
pub mod value_objects;

pub use category::{Category, CategoryUpdate, NewCategory};
pub use product::{NewProduct, Product, ProductFilter, ProductUpdate};
pub use repository::{CategoryRepository, ProductRepository, TagRepository};
pub use tag::{NewTag, Tag, TagUpdate};
pub use value_objects::{
    CategoryId, CategoryName, Price, ProductId, ProductName, SeoMeta, TagId, TagName,
};
