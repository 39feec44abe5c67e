use std::sync::Arc;

use crate::application::dto::AuthenticatedUser;
use crate::domain::catalog::{CategoryRepository, ProductRepository, TagRepository};

/// Public catalog reads. Inactive entries are visible only to callers
/// holding `catalog:write`.
pub struct CatalogQueryService {
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) product_repo: Arc<dyn ProductRepository>,
}

impl CatalogQueryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        product_repo: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            category_repo,
            tag_repo,
            product_repo,
        }
    }
}

pub(super) fn can_see_inactive(actor: Option<&AuthenticatedUser>) -> bool {
    actor.is_some_and(|user| user.has_capability("catalog", "write"))
}
