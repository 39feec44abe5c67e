// src/domain/catalog/repository.rs
use crate::domain::catalog::{
    category::{Category, CategoryUpdate, NewCategory},
    product::{NewProduct, Product, ProductFilter, ProductUpdate},
    tag::{NewTag, Tag, TagUpdate},
    value_objects::{CategoryId, CategoryName, ProductId, TagId, TagName},
};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugRegistry};
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: SlugRegistry {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>>;
    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>>;
    /// Ordered by name.
    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Category>>;
    async fn list_children(
        &self,
        parent: CategoryId,
        include_inactive: bool,
    ) -> DomainResult<Vec<Category>>;
}

#[async_trait]
pub trait TagRepository: SlugRegistry {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag>;
    async fn update(&self, update: TagUpdate) -> DomainResult<Tag>;
    async fn delete(&self, id: TagId) -> DomainResult<()>;
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>>;
    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>>;
    async fn find_many(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>>;
    async fn list(&self) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
pub trait ProductRepository: SlugRegistry {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product>;
    async fn update(&self, update: ProductUpdate) -> DomainResult<Product>;
    async fn delete(&self, id: ProductId) -> DomainResult<()>;
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;
    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>>;
    /// Newest first.
    async fn list_page(
        &self,
        filter: ProductFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Product>, Option<ListCursor>)>;
}
