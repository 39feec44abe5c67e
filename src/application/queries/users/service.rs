use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::domain::user::{AddressRepository, UserRepository, UserSettingsRepository};

pub struct UserQueryService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) address_repo: Arc<dyn AddressRepository>,
    pub(super) settings_repo: Arc<dyn UserSettingsRepository>,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserQueryService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        address_repo: Arc<dyn AddressRepository>,
        settings_repo: Arc<dyn UserSettingsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            address_repo,
            settings_repo,
            clock,
        }
    }
}
