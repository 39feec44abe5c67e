use super::{CatalogQueryService, service::can_see_inactive};
use crate::{
    application::{
        dto::{AuthenticatedUser, CursorPage, ProductDto, pagination::normalize_limit},
        error::{ApplicationError, ApplicationResult},
        queries::decode_cursor,
    },
    domain::{catalog::ProductFilter, slug::SlugPolicy},
};

pub struct ListProductsQuery {
    pub limit: u32,
    pub cursor: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Tag slug.
    pub tag: Option<String>,
    pub include_inactive: bool,
}

impl CatalogQueryService {
    pub async fn list_products(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: ListProductsQuery,
    ) -> ApplicationResult<CursorPage<ProductDto>> {
        let limit = normalize_limit(query.limit);
        let cursor = decode_cursor(query.cursor.as_deref())?;
        let include_inactive = query.include_inactive && can_see_inactive(actor);

        let mut filter = ProductFilter {
            include_inactive,
            ..ProductFilter::default()
        };

        if let Some(raw) = query.category.as_deref() {
            let not_found = || ApplicationError::not_found("category not found");
            let slug = SlugPolicy::CATEGORY.parse(raw).map_err(|_| not_found())?;
            let category = self
                .category_repo
                .find_by_slug(&slug)
                .await?
                .filter(|category| include_inactive || category.is_active)
                .ok_or_else(not_found)?;
            filter.category_id = Some(category.id);
        }
        if let Some(raw) = query.tag.as_deref() {
            let not_found = || ApplicationError::not_found("tag not found");
            let slug = SlugPolicy::TAG.parse(raw).map_err(|_| not_found())?;
            let tag = self
                .tag_repo
                .find_by_slug(&slug)
                .await?
                .ok_or_else(not_found)?;
            filter.tag_id = Some(tag.id);
        }

        let (products, next_cursor) = self
            .product_repo
            .list_page(filter, limit, cursor)
            .await?;

        Ok(CursorPage::from_domain(
            products,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }

    pub async fn get_product_by_slug(
        &self,
        actor: Option<&AuthenticatedUser>,
        slug: &str,
    ) -> ApplicationResult<ProductDto> {
        let not_found = || ApplicationError::not_found("product not found");
        let slug = SlugPolicy::PRODUCT.parse(slug).map_err(|_| not_found())?;
        let include_inactive = can_see_inactive(actor);

        self.product_repo
            .find_by_slug(&slug)
            .await?
            .filter(|product| include_inactive || product.is_active)
            .map(Into::into)
            .ok_or_else(not_found)
    }
}
