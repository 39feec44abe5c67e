use std::future::Future;

use super::CatalogCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        errors::DomainResult,
        slug::{Slug, SlugPolicy, SlugRegistry},
    },
};
use tracing::warn;

/// Writes racing on a generated slug are retried this many times in total.
pub(super) const MAX_SLUG_ATTEMPTS: u32 = 3;

impl CatalogCommandService {
    /// Validate an optional caller-supplied slug.
    pub(super) fn supplied_slug(
        &self,
        raw: Option<String>,
        policy: SlugPolicy,
    ) -> ApplicationResult<Option<Slug>> {
        raw.map(|raw| self.slugs.parse(&raw, policy))
            .transpose()
            .map_err(Into::into)
    }

    /// Run `persist` with either the supplied slug or a freshly generated one.
    ///
    /// A supplied slug that is already taken is a conflict. A generated slug
    /// that loses a race against a concurrent writer is regenerated.
    pub(super) async fn persist_with_slug<R, T, F, Fut>(
        &self,
        registry: &R,
        name: &str,
        policy: SlugPolicy,
        supplied: Option<Slug>,
        exclude: Option<i64>,
        mut persist: F,
    ) -> ApplicationResult<T>
    where
        R: SlugRegistry + ?Sized,
        F: FnMut(Slug) -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        if let Some(slug) = supplied {
            if registry.slug_exists(&slug, exclude).await? {
                return Err(ApplicationError::conflict(format!(
                    "slug '{slug}' already exists"
                )));
            }
            return Ok(persist(slug).await?);
        }

        let mut attempt = 1;
        loop {
            let slug = self
                .slugs
                .unique_slug(name, policy, registry, exclude)
                .await?;
            match persist(slug).await {
                Err(err) if err.is_duplicate_slug() && attempt < MAX_SLUG_ATTEMPTS => {
                    warn!(attempt, error = %err, "generated slug claimed concurrently");
                    attempt += 1;
                }
                result => return Ok(result?),
            }
        }
    }
}
