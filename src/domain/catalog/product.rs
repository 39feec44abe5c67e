// src/domain/catalog/product.rs
use crate::domain::catalog::value_objects::{CategoryId, Price, ProductId, ProductName, TagId};
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub slug: Slug,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: Option<ProductName>,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<Option<CategoryId>>,
    pub tag_ids: Option<Vec<TagId>>,
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl ProductUpdate {
    pub const fn new(id: ProductId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            description: None,
            price: None,
            category_id: None,
            tag_ids: None,
            is_active: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: ProductName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub const fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    pub const fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Listing filter for products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub include_inactive: bool,
}
