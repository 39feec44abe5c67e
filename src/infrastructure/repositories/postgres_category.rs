use super::error::map_sqlx;
use crate::domain::catalog::{
    Category, CategoryId, CategoryName, CategoryRepository, CategoryUpdate, NewCategory, SeoMeta,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugPolicy, SlugRegistry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const CATEGORY_COLUMNS: &str = "id, name, slug, description, parent_id, is_active, meta_title, \
     meta_description, meta_keywords, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(&self, clause: &str, value: &str) -> DomainResult<Option<Category>> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE {clause} = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    parent_id: Option<i64>,
    is_active: bool,
    meta_title: String,
    meta_description: String,
    meta_keywords: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(row.id)?,
            name: CategoryName::new(row.name)?,
            slug: SlugPolicy::CATEGORY.parse(row.slug)?,
            description: row.description,
            parent_id: row.parent_id.map(CategoryId::new).transpose()?,
            is_active: row.is_active,
            seo: SeoMeta::new(row.meta_title, row.meta_description, row.meta_keywords)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SlugRegistry for PostgresCategoryRepository {
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE slug = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(slug.as_str())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let sql = format!(
            "INSERT INTO categories (name, slug, description, parent_id, is_active, meta_title, \
             meta_description, meta_keywords, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9) RETURNING {CATEGORY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(category.name.as_str())
            .bind(category.slug.as_str())
            .bind(&category.description)
            .bind(category.parent_id.map(i64::from))
            .bind(category.is_active)
            .bind(&category.seo.title)
            .bind(&category.seo.description)
            .bind(&category.seo.keywords)
            .bind(category.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Category::try_from(row)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE categories SET ");
        let mut fields = builder.separated(", ");
        fields.push("updated_at = ").push_bind_unseparated(update.updated_at);
        if let Some(name) = update.name {
            fields.push("name = ").push_bind_unseparated(name.into_inner());
        }
        if let Some(slug) = update.slug {
            fields.push("slug = ").push_bind_unseparated(slug.into_inner());
        }
        if let Some(description) = update.description {
            fields.push("description = ").push_bind_unseparated(description);
        }
        if let Some(parent_id) = update.parent_id {
            fields
                .push("parent_id = ")
                .push_bind_unseparated(parent_id.map(i64::from));
        }
        if let Some(is_active) = update.is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        if let Some(seo) = update.seo {
            fields.push("meta_title = ").push_bind_unseparated(seo.title);
            fields
                .push("meta_description = ")
                .push_bind_unseparated(seo.description);
            fields.push("meta_keywords = ").push_bind_unseparated(seo.keywords);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(update.id));
        builder.push(" RETURNING ");
        builder.push(CATEGORY_COLUMNS);

        let row = builder
            .build_query_as::<CategoryRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;

        Category::try_from(row)
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("category not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Category::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Category>> {
        self.fetch_one_where("slug", slug.as_str()).await
    }

    async fn find_by_name(&self, name: &CategoryName) -> DomainResult<Option<Category>> {
        self.fetch_one_where("name", name.as_str()).await
    }

    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE ($1 OR is_active) ORDER BY name"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn list_children(
        &self,
        parent: CategoryId,
        include_inactive: bool,
    ) -> DomainResult<Vec<Category>> {
        let sql = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE parent_id = $1 AND ($2 OR is_active) ORDER BY name"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(i64::from(parent))
            .bind(include_inactive)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Category::try_from).collect()
    }
}
