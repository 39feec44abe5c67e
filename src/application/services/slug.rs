// src/application/services/slug.rs
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::DomainResult;
use crate::domain::slug::{Slug, SlugCandidates, SlugPolicy, SlugRegistry};

/// Find the first free slug for `name` using a synchronous membership test.
///
/// Candidates are probed until `exists` answers `false`; the loop has no
/// attempt cap.
pub fn generate_unique_slug<F>(
    name: &str,
    policy: SlugPolicy,
    generator: &dyn SlugGenerator,
    mut exists: F,
) -> DomainResult<Slug>
where
    F: FnMut(&Slug) -> bool,
{
    let mut candidates = SlugCandidates::new(&generator.slugify(name), policy);
    loop {
        let candidate = candidates.next_candidate(|| generator.random_suffix())?;
        if !exists(&candidate) {
            return Ok(candidate);
        }
        debug!(slug = %candidate, "slug taken, retrying with suffix");
    }
}

/// Produces unique slugs for any entity type backed by a [`SlugRegistry`].
pub struct SlugService {
    generator: Arc<dyn SlugGenerator>,
}

impl SlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    /// `exclude` is the id of the row being renamed, so an entity can keep
    /// its own slug.
    pub async fn unique_slug<R>(
        &self,
        name: &str,
        policy: SlugPolicy,
        registry: &R,
        exclude: Option<i64>,
    ) -> DomainResult<Slug>
    where
        R: SlugRegistry + ?Sized,
    {
        let mut candidates = SlugCandidates::new(&self.generator.slugify(name), policy);
        loop {
            let candidate = candidates.next_candidate(|| self.generator.random_suffix())?;
            if !registry.slug_exists(&candidate, exclude).await? {
                return Ok(candidate);
            }
            debug!(slug = %candidate, "slug taken, retrying with suffix");
        }
    }

    /// Validate a caller-supplied slug against `policy`.
    pub fn parse(&self, raw: &str, policy: SlugPolicy) -> DomainResult<Slug> {
        policy.parse(raw.trim())
    }
}
