use std::sync::Arc;

use super::CatalogCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, TagDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        catalog::{NewTag, Tag, TagId, TagName, TagUpdate},
        slug::SlugPolicy,
    },
};
use tracing::info;

pub struct CreateTagCommand {
    pub name: String,
    pub slug: Option<String>,
}

pub struct UpdateTagCommand {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl CatalogCommandService {
    pub async fn create_tag(
        &self,
        actor: &AuthenticatedUser,
        command: CreateTagCommand,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "catalog", "write")?;

        let name = TagName::new(command.name)?;
        self.ensure_tag_name_free(&name, None).await?;
        let supplied = self.supplied_slug(command.slug, SlugPolicy::TAG)?;
        let created_at = self.clock.now();
        let repo = Arc::clone(&self.tag_repo);

        let tag = self
            .persist_with_slug(
                self.tag_repo.as_ref(),
                name.as_str(),
                SlugPolicy::TAG,
                supplied,
                None,
                |slug| {
                    let repo = Arc::clone(&repo);
                    let new_tag = NewTag {
                        name: name.clone(),
                        slug,
                        created_at,
                    };
                    async move { repo.insert(new_tag).await }
                },
            )
            .await?;

        info!(tag_id = tag.id.0, slug = %tag.slug, "tag created");
        Ok(tag.into())
    }

    pub async fn update_tag(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: UpdateTagCommand,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_tag(id).await?;
        let mut update = TagUpdate::new(current.id);
        if let Some(name) = command.name {
            let name = TagName::new(name)?;
            self.ensure_tag_name_free(&name, Some(current.id)).await?;
            update = update.with_name(name);
        }

        let tag = match self.supplied_slug(command.slug, SlugPolicy::TAG)? {
            Some(slug) if slug != current.slug => {
                let repo = Arc::clone(&self.tag_repo);
                self.persist_with_slug(
                    self.tag_repo.as_ref(),
                    current.name.as_str(),
                    SlugPolicy::TAG,
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
            _ if update.name.is_none() => {
                return Err(ApplicationError::validation(
                    "at least one field must be provided",
                ));
            }
            _ => self.tag_repo.update(update).await?,
        };

        Ok(tag.into())
    }

    pub async fn regenerate_tag_slug(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<TagDto> {
        ensure_capability(actor, "catalog", "write")?;

        let current = self.existing_tag(id).await?;
        let repo = Arc::clone(&self.tag_repo);
        let tag = self
            .persist_with_slug(
                self.tag_repo.as_ref(),
                current.name.as_str(),
                SlugPolicy::TAG,
                None,
                Some(current.id.0),
                |slug| {
                    let repo = Arc::clone(&repo);
                    let update = TagUpdate::new(current.id).with_slug(slug);
                    async move { repo.update(update).await }
                },
            )
            .await?;

        info!(tag_id = tag.id.0, slug = %tag.slug, "tag slug regenerated");
        Ok(tag.into())
    }

    pub async fn delete_tag(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<()> {
        ensure_capability(actor, "catalog", "write")?;

        let id = TagId::new(id)?;
        self.tag_repo.delete(id).await?;
        info!(tag_id = id.0, "tag deleted");
        Ok(())
    }

    async fn existing_tag(&self, id: i64) -> ApplicationResult<Tag> {
        let id = TagId::new(id)?;
        self.tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("tag not found"))
    }

    async fn ensure_tag_name_free(&self, name: &TagName, owner: Option<TagId>) -> ApplicationResult<()> {
        match self.tag_repo.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => Err(ApplicationError::conflict(
                format!("tag '{name}' already exists"),
            )),
            _ => Ok(()),
        }
    }
}
