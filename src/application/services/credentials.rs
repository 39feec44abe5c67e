// src/application/services/credentials.rs
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::PasswordHasher,
};
use crate::domain::user::{User, UserRepository};

/// Resolves an email/password pair to exactly one active account.
///
/// Every rejection surfaces as [`ApplicationError::invalid_credentials`] so
/// callers cannot tell an unknown email from a wrong password. Repository
/// failures are propagated as errors and never grant access.
pub struct CredentialResolver {
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CredentialResolver {
    pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            user_repo,
            password_hasher,
        }
    }

    pub async fn resolve(&self, email: &str, password: &str) -> ApplicationResult<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApplicationError::invalid_credentials());
        }

        let mut matches = self.user_repo.find_by_email_ignore_case(email).await?;
        let user = match matches.len() {
            1 => matches.remove(0),
            0 => {
                debug!("login rejected: unknown email");
                return Err(ApplicationError::invalid_credentials());
            }
            n => {
                warn!(matches = n, "login rejected: email matches several accounts");
                return Err(ApplicationError::invalid_credentials());
            }
        };

        match self
            .password_hasher
            .verify(password, user.password_hash.as_str())
            .await
        {
            Ok(()) => {}
            Err(ApplicationError::Unauthorized(_)) => {
                debug!(user_id = %user.id, "login rejected: password mismatch");
                return Err(ApplicationError::invalid_credentials());
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "login rejected: stored hash unusable");
                return Err(ApplicationError::invalid_credentials());
            }
        }

        if !user.can_authenticate() {
            debug!(user_id = %user.id, "login rejected: account deactivated");
            return Err(ApplicationError::invalid_credentials());
        }

        Ok(user)
    }
}
