// tests/support/builders.rs
use bazaar_core::application::dto::AuthenticatedUser;
use bazaar_core::domain::user::{
    Email, FirstName, LastName, PasswordHash, PersonalDetails, Role, User, UserId,
};
use chrono::Duration;

use super::mocks::{StrictPasswordHasher, fixed_now};

pub const DEFAULT_PASSWORD: &str = "Correct-Horse-9";

/// Builds stored users whose hash matches [`StrictPasswordHasher`].
pub struct UserBuilder {
    id: i64,
    email: String,
    password: String,
    first_name: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
}

impl UserBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            email: format!("user{id}@example.com"),
            password: DEFAULT_PASSWORD.into(),
            first_name: "Test".into(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_staff = true;
        self.is_superuser = true;
        self
    }

    pub fn build(self) -> User {
        User {
            id: UserId::new(self.id).unwrap(),
            email: Email::new(self.email).unwrap(),
            password_hash: PasswordHash::new(StrictPasswordHasher::hash_of(&self.password))
                .unwrap(),
            details: PersonalDetails {
                first_name: FirstName::new(self.first_name).unwrap(),
                last_name: LastName::default(),
                phone_number: None,
                date_of_birth: None,
            },
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            date_joined: fixed_now() + Duration::seconds(self.id),
            last_login: None,
        }
    }
}

/// Authenticated caller with the default capabilities of `role`.
pub fn actor(id: i64, role: Role) -> AuthenticatedUser {
    let now = fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        email: format!("user{id}@example.com"),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}
