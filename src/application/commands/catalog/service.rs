use std::sync::Arc;

use crate::application::{ports::time::Clock, services::slug::SlugService};
use crate::domain::catalog::{CategoryRepository, ProductRepository, TagRepository};

/// Staff-side writes to categories, tags and products.
pub struct CatalogCommandService {
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) tag_repo: Arc<dyn TagRepository>,
    pub(super) product_repo: Arc<dyn ProductRepository>,
    pub(super) slugs: Arc<SlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CatalogCommandService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        tag_repo: Arc<dyn TagRepository>,
        product_repo: Arc<dyn ProductRepository>,
        slugs: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            category_repo,
            tag_repo,
            product_repo,
            slugs,
            clock,
        }
    }
}
