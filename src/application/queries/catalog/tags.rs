use super::CatalogQueryService;
use crate::{
    application::{
        dto::TagDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::SlugPolicy,
};

impl CatalogQueryService {
    pub async fn list_tags(&self) -> ApplicationResult<Vec<TagDto>> {
        let tags = self.tag_repo.list().await?;
        Ok(tags.into_iter().map(Into::into).collect())
    }

    pub async fn get_tag_by_slug(&self, slug: &str) -> ApplicationResult<TagDto> {
        let not_found = || ApplicationError::not_found("tag not found");
        let slug = SlugPolicy::TAG.parse(slug).map_err(|_| not_found())?;
        self.tag_repo
            .find_by_slug(&slug)
            .await?
            .map(Into::into)
            .ok_or_else(not_found)
    }
}
