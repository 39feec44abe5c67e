use std::collections::HashSet;
use std::sync::Arc;

use super::CatalogCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        catalog::{Category, CategoryId, CategoryName, CategoryUpdate, NewCategory, SeoMeta},
        slug::SlugPolicy,
    },
};
use tracing::info;

pub struct CreateCategoryCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub is_active: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

/// `parent_id: Some(None)` detaches the category from its parent.
#[derive(Default)]
pub struct UpdateCategoryCommand {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Option<i64>>,
    pub is_active: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

impl CatalogCommandService {
    pub async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "catalog", "write")?;

        let name = CategoryName::new(command.name)?;
        self.ensure_category_name_free(&name, None).await?;
        let parent_id = match command.parent_id {
            Some(id) => Some(self.existing_category(id).await?.id),
            None => None,
        };
        let seo = SeoMeta::new(
            command.meta_title.unwrap_or_default(),
            command.meta_description.unwrap_or_default(),
            command.meta_keywords.unwrap_or_default(),
        )?;
        let supplied = self.supplied_slug(command.slug, SlugPolicy::CATEGORY)?;

        let description = command.description.unwrap_or_default();
        let is_active = command.is_active.unwrap_or(true);
        let created_at = self.clock.now();
        let repo = Arc::clone(&self.category_repo);

        let category = self
            .persist_with_slug(
                self.category_repo.as_ref(),
                name.as_str(),
                SlugPolicy::CATEGORY,
                supplied,
                None,
                |slug| {
                    let repo = Arc::clone(&repo);
                    let new_category = NewCategory {
                        name: name.clone(),
                        slug,
                        description: description.clone(),
                        parent_id,
                        is_active,
                        seo: seo.clone(),
                        created_at,
                    };
                    async move { repo.insert(new_category).await }
                },
            )
            .await?;

        info!(category_id = category.id.0, slug = %category.slug, "category created");
        Ok(category.into())
    }

    pub async fn update_category(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_category(id).await?;
        let mut update = CategoryUpdate::new(current.id, self.clock.now());

        if let Some(name) = command.name {
            let name = CategoryName::new(name)?;
            self.ensure_category_name_free(&name, Some(current.id)).await?;
            update = update.with_name(name);
        }
        if let Some(description) = command.description {
            update = update.with_description(description);
        }
        if let Some(parent_id) = command.parent_id {
            let parent_id = match parent_id {
                Some(parent) => {
                    let parent = self.existing_category(parent).await?;
                    self.ensure_not_ancestor(current.id, &parent).await?;
                    Some(parent.id)
                }
                None => None,
            };
            update = update.with_parent(parent_id);
        }
        if let Some(is_active) = command.is_active {
            update = update.with_is_active(is_active);
        }
        if command.meta_title.is_some()
            || command.meta_description.is_some()
            || command.meta_keywords.is_some()
        {
            let seo = SeoMeta::new(
                command.meta_title.unwrap_or(current.seo.title),
                command.meta_description.unwrap_or(current.seo.description),
                command.meta_keywords.unwrap_or(current.seo.keywords),
            )?;
            update = update.with_seo(seo);
        }

        let category = match self.supplied_slug(command.slug, SlugPolicy::CATEGORY)? {
            Some(slug) if slug != current.slug => {
                let repo = Arc::clone(&self.category_repo);
                self.persist_with_slug(
                    self.category_repo.as_ref(),
                    current.name.as_str(),
                    SlugPolicy::CATEGORY,
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
            _ => self.category_repo.update(update).await?,
        };

        Ok(category.into())
    }

    pub async fn regenerate_category_slug(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_category(id).await?;
        let updated_at = self.clock.now();
        let repo = Arc::clone(&self.category_repo);

        let category = self
            .persist_with_slug(
                self.category_repo.as_ref(),
                current.name.as_str(),
                SlugPolicy::CATEGORY,
                None,
                Some(current.id.0),
                |slug| {
                    let repo = Arc::clone(&repo);
                    let update = CategoryUpdate::new(current.id, updated_at).with_slug(slug);
                    async move { repo.update(update).await }
                },
            )
            .await?;

        info!(category_id = category.id.0, slug = %category.slug, "category slug regenerated");
        Ok(category.into())
    }

    pub async fn delete_category(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "catalog", "write")?;

        let id = CategoryId::new(id)?;
        self.category_repo.delete(id).await?;
        info!(category_id = id.0, "category deleted");
        Ok(())
    }

    pub(super) async fn existing_category(&self, id: i64) -> ApplicationResult<Category> {
        let id = CategoryId::new(id)?;
        self.category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))
    }

    async fn ensure_category_name_free(
        &self,
        name: &CategoryName,
        owner: Option<CategoryId>,
    ) -> ApplicationResult<()> {
        match self.category_repo.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(
                format!("category '{name}' already exists"),
            )),
            _ => Ok(()),
        }
    }

    /// Walk up from `parent` and reject the move if `id` is on the path.
    async fn ensure_not_ancestor(&self, id: CategoryId, parent: &Category) -> ApplicationResult<()> {
        let mut seen = HashSet::new();
        let mut cursor = Some(parent.clone());
        while let Some(node) = cursor {
            if node.id == id {
                return Err(ApplicationError::validation(
                    "a category cannot be nested under itself or its descendants",
                ));
            }
            if !seen.insert(node.id) {
                break;
            }
            cursor = match node.parent_id {
                Some(next) => self.category_repo.find_by_id(next).await?,
                None => None,
            };
        }
        Ok(())
    }
}
