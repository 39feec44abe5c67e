use crate::domain::cursor::ListCursor;
use crate::domain::errors::DomainResult;
use crate::domain::user::{
    address::{Address, AddressId, NewAddress, PostalAddress},
    entity::{NewUser, User, UserUpdate},
    settings::{PreferencesPatch, UserSettings},
    value_objects::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores the account together with its default settings; either both
    /// rows exist afterwards or neither does.
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Accounts whose email equals `email` ignoring case, at most two. More
    /// than one row means the uniqueness index was bypassed; callers must
    /// treat that as ambiguous.
    async fn find_by_email_ignore_case(&self, email: &str) -> DomainResult<Vec<User>>;

    async fn update(&self, id: UserId, update: UserUpdate) -> DomainResult<User>;

    async fn delete(&self, id: UserId) -> DomainResult<()>;

    async fn list_page(
        &self,
        limit: u32,
        cursor: Option<ListCursor>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<User>, Option<ListCursor>)>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn insert(&self, address: NewAddress) -> DomainResult<Address>;

    async fn update(
        &self,
        id: AddressId,
        postal: PostalAddress,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Address>;

    async fn delete(&self, id: AddressId) -> DomainResult<()>;

    async fn find_by_id(&self, id: AddressId) -> DomainResult<Option<Address>>;

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Address>>;
}

#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    /// Return the stored settings, creating the defaults on first access.
    async fn get_or_create(&self, user_id: UserId, now: DateTime<Utc>)
    -> DomainResult<UserSettings>;

    async fn update(
        &self,
        user_id: UserId,
        patch: PreferencesPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<UserSettings>;
}
