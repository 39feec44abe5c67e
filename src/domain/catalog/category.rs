// src/domain/catalog/category.rs
use crate::domain::catalog::value_objects::{CategoryId, CategoryName, SeoMeta};
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

/// Product category. Categories nest through `parent_id`
/// (e.g. Electronics -> Mobiles -> Smartphones).
#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: Slug,
    pub description: String,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub seo: SeoMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: Slug,
    pub description: String,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub seo: SeoMeta,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub name: Option<CategoryName>,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub parent_id: Option<Option<CategoryId>>,
    pub is_active: Option<bool>,
    pub seo: Option<SeoMeta>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryUpdate {
    pub const fn new(id: CategoryId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: None,
            slug: None,
            description: None,
            parent_id: None,
            is_active: None,
            seo: None,
            updated_at,
        }
    }

    pub fn with_name(mut self, name: CategoryName) -> Self {
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

    pub const fn with_parent(mut self, parent_id: Option<CategoryId>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub const fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_seo(mut self, seo: SeoMeta) -> Self {
        self.seo = Some(seo);
        self
    }

    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(slug) = self.slug {
            category.slug = slug;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        if let Some(parent_id) = self.parent_id {
            category.parent_id = parent_id;
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
        if let Some(seo) = self.seo {
            category.seo = seo;
        }
        category.updated_at = self.updated_at;
    }
}
