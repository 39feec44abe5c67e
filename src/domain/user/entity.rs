// src/domain/user/entity.rs
use crate::domain::user::value_objects::{
    Capability, Email, FirstName, LastName, PasswordHash, PhoneNumber, Role, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashSet;

/// Personal details editable by the account owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalDetails {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub phone_number: Option<PhoneNumber>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub details: PersonalDetails,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub const fn role(&self) -> Role {
        Role::from_flags(self.is_staff, self.is_superuser)
    }

    pub fn capabilities(&self) -> HashSet<Capability> {
        self.role().default_capabilities()
    }

    /// Deactivated accounts keep their data but may not log in.
    pub const fn can_authenticate(&self) -> bool {
        self.is_active
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub details: PersonalDetails,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl NewUser {
    pub const fn customer(
        email: Email,
        password_hash: PasswordHash,
        details: PersonalDetails,
        date_joined: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            password_hash,
            details,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined,
        }
    }

    pub const fn superuser(
        email: Email,
        password_hash: PasswordHash,
        details: PersonalDetails,
        date_joined: DateTime<Utc>,
    ) -> Self {
        Self {
            email,
            password_hash,
            details,
            is_active: true,
            is_staff: true,
            is_superuser: true,
            date_joined,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<Email>,
    pub first_name: Option<FirstName>,
    pub last_name: Option<LastName>,
    pub phone_number: Option<Option<PhoneNumber>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub password_hash: Option<PasswordHash>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.is_active.is_none()
            && self.is_staff.is_none()
            && self.password_hash.is_none()
            && self.last_login.is_none()
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_first_name(mut self, first_name: FirstName) -> Self {
        self.first_name = Some(first_name);
        self
    }

    pub fn with_last_name(mut self, last_name: LastName) -> Self {
        self.last_name = Some(last_name);
        self
    }

    pub fn with_phone_number(mut self, phone_number: Option<PhoneNumber>) -> Self {
        self.phone_number = Some(phone_number);
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: Option<NaiveDate>) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub const fn with_is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub const fn with_is_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = Some(is_staff);
        self
    }

    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    pub const fn with_last_login(mut self, at: DateTime<Utc>) -> Self {
        self.last_login = Some(at);
        self
    }

    /// Apply the update to an in-memory user.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(first_name) = self.first_name {
            user.details.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.details.last_name = last_name;
        }
        if let Some(phone_number) = self.phone_number {
            user.details.phone_number = phone_number;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            user.details.date_of_birth = date_of_birth;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_staff) = self.is_staff {
            user.is_staff = is_staff;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(at) = self.last_login {
            user.last_login = Some(at);
        }
    }
}
