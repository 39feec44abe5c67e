use std::sync::Arc;

use crate::application::{
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::credentials::CredentialResolver,
};
use crate::domain::user::UserRepository;

/// Registration, login and staff-side account administration.
pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) credentials: CredentialResolver,
    pub(super) clock: Arc<dyn Clock>,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let credentials =
            CredentialResolver::new(Arc::clone(&user_repo), Arc::clone(&password_hasher));
        Self {
            user_repo,
            password_hasher,
            token_manager,
            credentials,
            clock,
        }
    }
}
