// src/domain/catalog/tag.rs
use crate::domain::catalog::value_objects::{TagId, TagName};
use crate::domain::slug::Slug;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: TagName,
    pub slug: Slug,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TagUpdate {
    pub id: TagId,
    pub name: Option<TagName>,
    pub slug: Option<Slug>,
}

impl TagUpdate {
    pub const fn new(id: TagId) -> Self {
        Self {
            id,
            name: None,
            slug: None,
        }
    }

    pub fn with_name(mut self, name: TagName) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }
}
