use super::error::map_sqlx;
use crate::domain::catalog::{
    CategoryId, NewProduct, Price, Product, ProductFilter, ProductId, ProductName,
    ProductRepository, ProductUpdate, TagId,
};
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{Slug, SlugPolicy, SlugRegistry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

/// Product columns plus the aggregated tag ids; expects the table alias `p`.
const PRODUCT_SELECT: &str = "SELECT p.id, p.name, p.slug, p.description, p.price_minor, \
     p.category_id, p.is_active, p.created_at, p.updated_at, \
     COALESCE((SELECT array_agg(pt.tag_id ORDER BY pt.tag_id) FROM product_tags pt \
               WHERE pt.product_id = p.id), '{}') AS tag_ids \
     FROM products p";

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, conn: &mut PgConnection, id: i64) -> DomainResult<Option<Product>> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }
}

async fn replace_tags(conn: &mut PgConnection, product_id: i64, tag_ids: &[TagId]) -> DomainResult<()> {
    sqlx::query("DELETE FROM product_tags WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = tag_ids.iter().copied().map(i64::from).collect();
    sqlx::query(
        "INSERT INTO product_tags (product_id, tag_id)
         SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) AS t(tag_id)
         ON CONFLICT DO NOTHING",
    )
    .bind(product_id)
    .bind(ids)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(())
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    slug: String,
    description: String,
    price_minor: i64,
    category_id: Option<i64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tag_ids: Vec<i64>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id)?,
            name: ProductName::new(row.name)?,
            slug: SlugPolicy::PRODUCT.parse(row.slug)?,
            description: row.description,
            price: Price::from_minor(row.price_minor)?,
            category_id: row.category_id.map(CategoryId::new).transpose()?,
            tag_ids: row
                .tag_ids
                .into_iter()
                .map(TagId::new)
                .collect::<Result<_, _>>()?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl SlugRegistry for PostgresProductRepository {
    async fn slug_exists(&self, slug: &Slug, exclude: Option<i64>) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM products WHERE slug = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(slug.as_str())
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO products (name, slug, description, price_minor, category_id, is_active,
                                   created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) RETURNING id",
        )
        .bind(product.name.as_str())
        .bind(product.slug.as_str())
        .bind(&product.description)
        .bind(product.price.minor_units())
        .bind(product.category_id.map(i64::from))
        .bind(product.is_active)
        .bind(product.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        replace_tags(&mut tx, id, &product.tag_ids).await?;
        let created = self
            .fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted product vanished".into()))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(created)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let id = i64::from(update.id);
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE products SET ");
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
        if let Some(price) = update.price {
            fields
                .push("price_minor = ")
                .push_bind_unseparated(price.minor_units());
        }
        if let Some(category_id) = update.category_id {
            fields
                .push("category_id = ")
                .push_bind_unseparated(category_id.map(i64::from));
        }
        if let Some(is_active) = update.is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(" RETURNING id");

        builder
            .build_query_scalar::<i64>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;

        if let Some(tag_ids) = update.tag_ids {
            replace_tags(&mut tx, id, &tag_ids).await?;
        }
        let updated = self
            .fetch(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("product not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        self.fetch(&mut conn, i64::from(id)).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<Product>> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.slug = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn list_page(
        &self,
        filter: ProductFilter,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Product>, Option<ListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(PRODUCT_SELECT);
        builder.push(" WHERE TRUE");
        if !filter.include_inactive {
            builder.push(" AND p.is_active");
        }
        if let Some(category_id) = filter.category_id {
            builder.push(" AND p.category_id = ");
            builder.push_bind(i64::from(category_id));
        }
        if let Some(tag_id) = filter.tag_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM product_tags f WHERE f.product_id = p.id AND f.tag_id = ",
            );
            builder.push_bind(i64::from(tag_id));
            builder.push(")");
        }
        if let Some(cursor) = cursor {
            builder.push(" AND (p.created_at, p.id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
        builder.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = if products.len() > limit as usize {
            products.pop();
            products
                .last()
                .map(|product| ListCursor::new(product.created_at, product.id.into()))
        } else {
            None
        };

        Ok((products, next_cursor))
    }
}
