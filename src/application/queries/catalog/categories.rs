use super::{CatalogQueryService, service::can_see_inactive};
use crate::{
    application::{
        dto::{AuthenticatedUser, CategoryDetailDto, CategoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::slug::SlugPolicy,
};

impl CatalogQueryService {
    /// `include_inactive` is ignored for callers without `catalog:write`.
    pub async fn list_categories(
        &self,
        actor: Option<&AuthenticatedUser>,
        include_inactive: bool,
    ) -> ApplicationResult<Vec<CategoryDto>> {
        let include_inactive = include_inactive && can_see_inactive(actor);
        let categories = self.category_repo.list(include_inactive).await?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    pub async fn get_category_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<CategoryDetailDto> {
        let not_found = || ApplicationError::not_found("category not found");
        let slug = SlugPolicy::CATEGORY.parse(slug).map_err(|_| not_found())?;
        let include_inactive = can_see_inactive(actor);

        let category = self
            .category_repo
            .find_by_slug(&slug)
            .await?
            .filter(|category| include_inactive || category.is_active)
            .ok_or_else(not_found)?;
        let children = self
            .category_repo
            .list_children(category.id, include_inactive)
            .await?;

        Ok(CategoryDetailDto {
            category: category.into(),
            children: children.into_iter().map(Into::into).collect(),
        })
    }
}
