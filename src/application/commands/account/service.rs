use std::sync::Arc;

use crate::application::ports::{security::PasswordHasher, time::Clock};
use crate::domain::user::{AddressRepository, UserRepository, UserSettingsRepository};

/// Self-service operations on the caller's own account.
pub struct AccountCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) address_repo: Arc<dyn AddressRepository>,
    pub(super) settings_repo: Arc<dyn UserSettingsRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) clock: Arc<dyn Clock>,
}

impl AccountCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        address_repo: Arc<dyn AddressRepository>,
        settings_repo: Arc<dyn UserSettingsRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            address_repo,
            settings_repo,
            password_hasher,
            clock,
        }
    }
}
