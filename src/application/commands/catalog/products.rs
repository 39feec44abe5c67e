use std::collections::BTreeSet;
use std::sync::Arc;

use super::CatalogCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, ProductDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        catalog::{
            CategoryId, NewProduct, Price, Product, ProductId, ProductName, ProductUpdate, TagId,
        },
        slug::SlugPolicy,
    },
};
use tracing::info;

pub struct CreateProductCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub is_active: Option<bool>,
}

/// `category_id: Some(None)` removes the category.
#[derive(Default)]
pub struct UpdateProductCommand {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub is_active: Option<bool>,
}

impl CatalogCommandService {
    pub async fn create_product(
        &self,
        actor: &AuthenticatedUser,
        command: CreateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        ensure_capability(actor, "catalog", "write")?;

        let name = ProductName::new(command.name)?;
        let price = Price::from_minor(command.price)?;
        let category_id = self.optional_category(command.category_id).await?;
        let tag_ids = self.existing_tags(&command.tag_ids).await?;
        let supplied = self.supplied_slug(command.slug, SlugPolicy::PRODUCT)?;

        let description = command.description.unwrap_or_default();
        let is_active = command.is_active.unwrap_or(true);
        let created_at = self.clock.now();
        let repo = Arc::clone(&self.product_repo);

        let product = self
            .persist_with_slug(
                self.product_repo.as_ref(),
                name.as_str(),
                SlugPolicy::PRODUCT,
                supplied,
                None,
                |slug| {
                    let repo = Arc::clone(&repo);
                    let new_product = NewProduct {
                        name: name.clone(),
                        slug,
                        description: description.clone(),
                        price,
                        category_id,
                        tag_ids: tag_ids.clone(),
                        is_active,
                        created_at,
                    };
                    async move { repo.insert(new_product).await }
                },
            )
            .await?;

        info!(product_id = product.id.0, slug = %product.slug, "product created");
        Ok(product.into())
    }

    pub async fn update_product(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_product(id).await?;
        let mut update = ProductUpdate::new(current.id, self.clock.now());

        if let Some(name) = command.name {
            update = update.with_name(ProductName::new(name)?);
        }
        if let Some(description) = command.description {
            update = update.with_description(description);
        }
        if let Some(price) = command.price {
            update = update.with_price(Price::from_minor(price)?);
        }
        if let Some(category_id) = command.category_id {
            update = update.with_category(self.optional_category(category_id).await?);
        }
        if let Some(tag_ids) = command.tag_ids {
            update = update.with_tags(self.existing_tags(&tag_ids).await?);
        }
        if let Some(is_active) = command.is_active {
            update = update.with_is_active(is_active);
        }

        let product = match self.supplied_slug(command.slug, SlugPolicy::PRODUCT)? {
            Some(slug) if slug != current.slug => {
                let repo = Arc::clone(&self.product_repo);
                self.persist_with_slug(
                    self.product_repo.as_ref(),
                    current.name.as_str(),
                    SlugPolicy::PRODUCT,
                    Some(slug),
                    Some(current.id.0),
                    |slug| {
                        let repo = Arc::clone(&repo);
                        let update = update.clone().with_slug(slug);
                        async move { repo.update(update).await }
                    },
                )
                .await?
            }
            _ => self.product_repo.update(update).await?,
        };

        Ok(product.into())
    }

    pub async fn regenerate_product_slug(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<ProductDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_product(id).await?;
        let updated_at = self.clock.now();
        let repo = Arc::clone(&self.product_repo);
        let product = self
            .persist_with_slug(
                self.product_repo.as_ref(),
                current.name.as_str(),
                SlugPolicy::PRODUCT,
                None,
                Some(current.id.0),
                |slug| {
                    let repo = Arc::clone(&repo);
                    let update = ProductUpdate::new(current.id, updated_at).with_slug(slug);
                    async move { repo.update(update).await }
                },
            )
            .await?;

        info!(product_id = product.id.0, slug = %product.slug, "product slug regenerated");
        Ok(product.into())
    }

    pub async fn delete_product(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "catalog", "write")?;

        let id = ProductId::new(id)?;
        self.product_repo.delete(id).await?;
        info!(product_id = id.0, "product deleted");
        Ok(())
    }

    async fn existing_product(&self, id: i64) -> ApplicationResult<Product> {
        let id = ProductId::new(id)?;
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))
    }

    async fn optional_category(&self, id: Option<i64>) -> ApplicationResult<Option<CategoryId>> {
        match id {
            Some(id) => Ok(Some(self.existing_category(id).await?.id)),
            None => Ok(None),
        }
    }

    /// Deduplicated, sorted ids; every one must name an existing tag.
    async fn existing_tags(&self, ids: &[i64]) -> ApplicationResult<Vec<TagId>> {
        let ids = ids
            .iter()
            .map(|id| TagId::new(*id))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let ids: Vec<TagId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(ids);
        }

        let found = self.tag_repo.find_many(&ids).await?;
        if found.len() != ids.len() {
            let known: BTreeSet<TagId> = found.iter().map(|tag| tag.id).collect();
            let missing: Vec<String> = ids
                .iter()
                .filter(|id| !known.contains(id))
                .map(|id| id.0.to_string())
                .collect();
            return Err(ApplicationError::validation(format!(
                "unknown tag ids: {}",
                missing.join(", ")
            )));
        }
        Ok(ids)
    }
}
