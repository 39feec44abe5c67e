// src/application/services/mod.rs
pub mod credentials;
pub mod slug;

use std::sync::Arc;

use crate::{
    application::{
        commands::{
            account::AccountCommandService, catalog::CatalogCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{catalog::CatalogQueryService, users::UserQueryService},
    },
    domain::{
        catalog::{CategoryRepository, ProductRepository, TagRepository},
        user::{AddressRepository, UserRepository, UserSettingsRepository},
    },
};

use self::slug::SlugService;

/// Adapters the application layer is assembled from.
pub struct ServiceDependencies {
    pub user_repo: Arc<dyn UserRepository>,
    pub address_repo: Arc<dyn AddressRepository>,
    pub settings_repo: Arc<dyn UserSettingsRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub tag_repo: Arc<dyn TagRepository>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub account_commands: Arc<AccountCommandService>,
    pub catalog_commands: Arc<CatalogCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub catalog_queries: Arc<CatalogQueryService>,
    token_manager: Arc<dyn TokenManager>,
    user_repo: Arc<dyn UserRepository>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies) -> Self {
        let user_repo = Arc::clone(&deps.user_repo);
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.password_hasher),
            Arc::clone(&deps.token_manager),
            Arc::clone(&deps.clock),
        ));

        let account_commands = Arc::new(AccountCommandService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.address_repo),
            Arc::clone(&deps.settings_repo),
            Arc::clone(&deps.password_hasher),
            Arc::clone(&deps.clock),
        ));

        let slug_service = Arc::new(SlugService::new(Arc::clone(&deps.slugger)));
        let catalog_commands = Arc::new(CatalogCommandService::new(
            Arc::clone(&deps.category_repo),
            Arc::clone(&deps.tag_repo),
            Arc::clone(&deps.product_repo),
            slug_service,
            Arc::clone(&deps.clock),
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&deps.user_repo),
            Arc::clone(&deps.address_repo),
            Arc::clone(&deps.settings_repo),
            Arc::clone(&deps.clock),
        ));
        let catalog_queries = Arc::new(CatalogQueryService::new(
            deps.category_repo,
            deps.tag_repo,
            deps.product_repo,
        ));

        Self {
            user_commands,
            account_commands,
            catalog_commands,
            user_queries,
            catalog_queries,
            token_manager: deps.token_manager,
            user_repo,
        }
    }

    /// Resolve a raw bearer token to the caller it was issued for.
    ///
    /// The account is reloaded on every call: a deleted or deactivated
    /// account is rejected, and role and capabilities follow the current
    /// flags rather than the ones embedded at login.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let mut caller = self.token_manager.authenticate(token).await?;

        let Some(user) = self.user_repo.find_by_id(caller.id).await? else {
            tracing::debug!(user_id = %caller.id, "token subject no longer exists");
            return Err(ApplicationError::invalid_credentials());
        };
        if !user.can_authenticate() {
            tracing::debug!(user_id = %caller.id, "token subject is inactive");
            return Err(ApplicationError::invalid_credentials());
        }

        caller.email = user.email.to_string();
        caller.role = user.role();
        caller.capabilities = user.capabilities();
        Ok(caller)
    }
}
