// tests/support/mocks/security.rs
use async_trait::async_trait;
use bazaar_core::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use bazaar_core::domain::user::{Role, UserId};
use chrono::Duration;

/// Bearer tokens understood by [`DummyTokenManager`]: `test:{user id}:{role}`.
pub const CUSTOMER_TOKEN: &str = "test:1:customer";
pub const STAFF_TOKEN: &str = "test:2:staff";
pub const SUPERUSER_TOKEN: &str = "test:3:superuser";
pub const EXPIRED_TOKEN: &str = "expired-token";

pub fn token_for(user_id: i64, role: Role) -> String {
    format!("test:{user_id}:{role}")
}

/* -------------------------------- TokenManager -------------------------------- */

/// Issues readable tokens that encode the subject, and authenticates them back.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: token_for(subject.user_id.0, subject.role),
            token_type: "Bearer".into(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let invalid = || ApplicationError::unauthorized("invalid token");
        if token == EXPIRED_TOKEN {
            return Err(ApplicationError::unauthorized("expired token"));
        }

        let mut parts = token.split(':');
        if parts.next() != Some("test") {
            return Err(invalid());
        }
        let id = parts
            .next()
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or_else(invalid)?;
        let role: Role = parts
            .next()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(invalid)?;

        let now = super::time::fixed_now();
        Ok(AuthenticatedUser {
            id: UserId::new(id).map_err(|_| invalid())?,
            email: format!("user{id}@example.com"),
            role,
            capabilities: role.default_capabilities(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
        })
    }
}

/* -------------------------------- PasswordHasher -------------------------------- */

/// Accepts any password.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, _password: &str) -> ApplicationResult<String> {
        Ok("hash".into())
    }

    async fn verify(&self, _password: &str, _expected_hash: &str) -> ApplicationResult<()> {
        Ok(())
    }
}

/// Plain-text "hash" (`hash::{password}`) compared exactly.
#[derive(Clone, Debug, Default)]
pub struct StrictPasswordHasher;

impl StrictPasswordHasher {
    pub fn hash_of(password: &str) -> String {
        format!("hash::{password}")
    }
}

#[async_trait]
impl PasswordHasher for StrictPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(Self::hash_of(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if Self::hash_of(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::invalid_credentials())
        }
    }
}

/// Fails every verification as if the stored hash were corrupt.
#[derive(Clone, Debug, Default)]
pub struct BrokenPasswordHasher;

#[async_trait]
impl PasswordHasher for BrokenPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(StrictPasswordHasher::hash_of(password))
    }

    async fn verify(&self, _password: &str, _expected_hash: &str) -> ApplicationResult<()> {
        Err(ApplicationError::infrastructure("invalid password hash format"))
    }
}
