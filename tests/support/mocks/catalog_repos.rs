// tests/support/mocks/catalog_repos.rs
use async_trait::async_trait;
use bazaar_core::domain::catalog::{
    Category, CategoryId, CategoryName, CategoryRepository, CategoryUpdate, NewCategory,
    NewProduct, NewTag, Product, ProductFilter, ProductId, ProductRepository, ProductUpdate, Tag,
    TagId, TagName, TagRepository, TagUpdate,
};
use bazaar_core::domain::cursor::ListCursor;
use bazaar_core::domain::errors::{DomainError, DomainResult};
use bazaar_core::domain::slug::{Slug, SlugRegistry};
use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use super::user_repos::page;

/// Slugs claimed by a concurrent writer. A claimed slug is invisible to
/// `slug_exists` until the first write that hits it fails with
/// `DuplicateSlug`; from then on it reads as taken, like a committed row.
#[derive(Debug, Default)]
pub struct RacedSlugs {
    pending: Mutex<HashSet<String>>,
    committed: Mutex<HashSet<String>>,
    collisions: Mutex<u32>,
}

impl RacedSlugs {
    pub fn claim(&self, slug: &str) {
        self.pending.lock().unwrap().insert(slug.to_string());
    }

    pub fn collisions(&self) -> u32 {
        *self.collisions.lock().unwrap()
    }

    fn visible(&self, slug: &Slug) -> bool {
        self.committed.lock().unwrap().contains(slug.as_str())
    }

    fn check(&self, slug: &Slug, entity: &str) -> DomainResult<()> {
        let lost = self.pending.lock().unwrap().remove(slug.as_str()) || self.visible(slug);
        if lost {
            *self.collisions.lock().unwrap() += 1;
            self.committed.lock().unwrap().insert(slug.as_str().to_string());
            return Err(DomainError::DuplicateSlug(entity.into()));
        }
        Ok(())
    }
}

fn next_id<T>(rows: &BTreeMap<i64, T>) -> i64 {
    rows.keys().next_back().copied().unwrap_or(0) + 1
}

/* -------------------------------- Categories -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryCategoryRepo {
    rows: Mutex<BTreeMap<i64, Category>>,
    pub raced: RacedSlugs,
}

impl InMemoryCategoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<Category> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn slug_taken(rows: &BTreeMap<i64, Category>, slug: &Slug, exclude: Option<i64>) -> bool {
        rows.values()
            .any(|c| &c.slug == slug && Some(c.id.0) != exclude)
    }
}

#[async_trait]
impl SlugRegistry for InMemoryCategoryRepo {
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool> {
        Ok(self.raced.visible(slug) || Self::slug_taken(&self.rows.lock().unwrap(), slug, exclude))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        self.raced.check(&category.slug, "category")?;
        let mut rows = self.rows.lock().unwrap();
        if Self::slug_taken(&rows, &category.slug, None) {
            return Err(DomainError::DuplicateSlug("category".into()));
        }
        if rows.values().any(|c| c.name == category.name) {
            return Err(DomainError::Conflict("category name already exists".into()));
        }
        let id = next_id(&rows);
        let stored = Category {
            id: CategoryId(id),
            name: category.name,
            slug: category.slug,
            description: category.description,
            parent_id: category.parent_id,
            is_active: category.is_active,
            seo: category.seo,
            created_at: category.created_at,
            updated_at: category.created_at,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        if let Some(slug) = &update.slug {
            self.raced.check(slug, "category")?;
        }
        let mut rows = self.rows.lock().unwrap();
        if let Some(slug) = &update.slug {
            if Self::slug_taken(&rows, slug, Some(update.id.0)) {
                return Err(DomainError::DuplicateSlug("category".into()));
            }
        }
        let category = rows
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        update.apply_to(category);
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.remove(&id.0)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        for child in rows.values_mut().filter(|c| c.parent_id == Some(id)) {
            child.parent_id = None;
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.get(id.0))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| &c.slug == slug)
            .cloned())
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|c| &c.name == name)
            .cloned())
    }

    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Category>> {
        let mut list: Vec<Category> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| include_inactive || c.is_active)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(list)
    }

    async fn list_children(
        &self,
        parent: CategoryId,
        include_inactive: bool,
    ) -> DomainResult<Vec<Category>> {
        Ok(self
            .list(include_inactive)
            .await?
            .into_iter()
            .filter(|c| c.parent_id == Some(parent))
            .collect())
    }
}

/* -------------------------------- Tags -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryTagRepo {
    rows: Mutex<BTreeMap<i64, Tag>>,
    pub raced: RacedSlugs,
}

impl InMemoryTagRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_taken(rows: &BTreeMap<i64, Tag>, slug: &Slug, exclude: Option<i64>) -> bool {
        rows.values()
            .any(|t| &t.slug == slug && Some(t.id.0) != exclude)
    }
}

#[async_trait]
impl SlugRegistry for InMemoryTagRepo {
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool> {
        Ok(self.raced.visible(slug) || Self::slug_taken(&self.rows.lock().unwrap(), slug, exclude))
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepo {
    async fn insert(&self, tag: NewTag) -> DomainResult<Tag> {
        self.raced.check(&tag.slug, "tag")?;
        let mut rows = self.rows.lock().unwrap();
        if Self::slug_taken(&rows, &tag.slug, None) {
            return Err(DomainError::DuplicateSlug("tag".into()));
        }
        if rows.values().any(|t| t.name == tag.name) {
            return Err(DomainError::Conflict("tag name already exists".into()));
        }
        let id = next_id(&rows);
        let stored = Tag {
            id: TagId(id),
            name: tag.name,
            slug: tag.slug,
            created_at: tag.created_at,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: TagUpdate) -> DomainResult<Tag> {
        if let Some(slug) = &update.slug {
            self.raced.check(slug, "tag")?;
        }
        let mut rows = self.rows.lock().unwrap();
        if let Some(slug) = &update.slug {
            if Self::slug_taken(&rows, slug, Some(update.id.0)) {
                return Err(DomainError::DuplicateSlug("tag".into()));
            }
        }
        let tag = rows
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::NotFound("tag not found".into()))?;
        if let Some(name) = update.name {
            tag.name = name;
        }
        if let Some(slug) = update.slug {
            tag.slug = slug;
        }
        Ok(tag.clone())
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("tag not found".into()))
    }

    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        Ok(self.rows.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Tag>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|t| &t.slug == slug)
            .cloned())
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|t| &t.name == name)
            .cloned())
    }

    async fn find_many(&self, ids: &[TagId]) -> DomainResult<Vec<Tag>> {
        let rows = self.rows.lock().unwrap();
        Ok(ids.iter().filter_map(|id| rows.get(&id.0).cloned()).collect())
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        let mut list: Vec<Tag> = self.rows.lock().unwrap().values().cloned().collect();
        list.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(list)
    }
}

/* -------------------------------- Products -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryProductRepo {
    rows: Mutex<BTreeMap<i64, Product>>,
    pub raced: RacedSlugs,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    fn slug_taken(rows: &BTreeMap<i64, Product>, slug: &Slug, exclude: Option<i64>) -> bool {
        rows.values()
            .any(|p| &p.slug == slug && Some(p.id.0) != exclude)
    }
}

#[async_trait]
impl SlugRegistry for InMemoryProductRepo {
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool> {
        Ok(self.raced.visible(slug) || Self::slug_taken(&self.rows.lock().unwrap(), slug, exclude))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepo {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        self.raced.check(&product.slug, "product")?;
        let mut rows = self.rows.lock().unwrap();
        if Self::slug_taken(&rows, &product.slug, None) {
            return Err(DomainError::DuplicateSlug("product".into()));
        }
        let id = next_id(&rows);
        let stored = Product {
            id: ProductId(id),
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            tag_ids: product.tag_ids,
            is_active: product.is_active,
            created_at: product.created_at,
            updated_at: product.created_at,
        };
        rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        if let Some(slug) = &update.slug {
            self.raced.check(slug, "product")?;
        }
        let mut rows = self.rows.lock().unwrap();
        if let Some(slug) = &update.slug {
            if Self::slug_taken(&rows, slug, Some(update.id.0)) {
                return Err(DomainError::DuplicateSlug("product".into()));
            }
        }
        let product = rows
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(slug) = update.slug {
            product.slug = slug;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(category_id) = update.category_id {
            product.category_id = category_id;
        }
        if let Some(tag_ids) = update.tag_ids {
            product.tag_ids = tag_ids;
        }
        if let Some(is_active) = update.is_active {
            product.is_active = is_active;
        }
        product.updated_at = update.updated_at;
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("product not found".into()))
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        Ok(self.get(id.0))
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|p| &p.slug == slug)
            .cloned())
    }

    async fn list_page(
        &self,
        filter: ProductFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Product>, Option<ListCursor>)> {
        let mut products: Vec<Product> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|p| filter.include_inactive || p.is_active)
            .filter(|p| filter.category_id.is_none_or(|id| p.category_id == Some(id)))
            .filter(|p| filter.tag_id.is_none_or(|id| p.tag_ids.contains(&id)))
            .filter(|p| match cursor {
                Some(c) => (p.created_at, p.id.0) < (c.created_at, c.id),
                None => true,
            })
            .cloned()
            .collect();
        products.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(page(products, limit, |p| ListCursor::new(p.created_at, p.id.0)))
    }
}
