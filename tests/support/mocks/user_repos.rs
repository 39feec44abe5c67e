// tests/support/mocks/user_repos.rs
use async_trait::async_trait;
use bazaar_core::domain::cursor::ListCursor;
use bazaar_core::domain::errors::{DomainError, DomainResult};
use bazaar_core::domain::user::{
    Address, AddressId, AddressRepository, NewAddress, NewUser, PostalAddress, PreferencesPatch,
    User, UserId, UserRepository, UserSettings, UserSettingsRepository, UserUpdate,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/* -------------------------------- Users -------------------------------- */

/// In-memory users keyed by id. `insert` enforces case-insensitive email
/// uniqueness like the `users_email_lower_key` index and stores default
/// settings in the attached settings repo; `seed` bypasses both.
#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: Mutex<BTreeMap<i64, User>>,
    settings: Option<Arc<InMemorySettingsRepo>>,
    fail_lookups: bool,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.seed(user);
        }
        repo
    }

    /// Every email lookup fails with a persistence error.
    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub fn with_settings(mut self, settings: Arc<InMemorySettingsRepo>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().insert(user.id.0, user);
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let key = new_user.email.lookup_key();
        if users.values().any(|u| u.email.lookup_key() == key) {
            return Err(DomainError::Conflict("email already registered".into()));
        }
        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id: UserId(id),
            email: new_user.email,
            password_hash: new_user.password_hash,
            details: new_user.details,
            is_active: new_user.is_active,
            is_staff: new_user.is_staff,
            is_superuser: new_user.is_superuser,
            date_joined: new_user.date_joined,
            last_login: None,
        };
        users.insert(id, user.clone());
        if let Some(settings) = &self.settings {
            settings.store_defaults(user.id, user.date_joined);
        }
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.get(id.0))
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> DomainResult<Vec<User>> {
        if self.fail_lookups {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        let needle = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.email.lookup_key() == needle)
            .take(2)
            .cloned()
            .collect())
    }

    async fn update(&self, id: UserId, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &update.email {
            let key = email.lookup_key();
            if users
                .values()
                .any(|u| u.id != id && u.email.lookup_key() == key)
            {
                return Err(DomainError::Conflict("email already registered".into()));
            }
        }
        let user = users
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        update.apply_to(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        self.users
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("user not found".into()))
    }

    async fn list_page(
        &self,
        limit: u32,
        cursor: Option<ListCursor>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<User>, Option<ListCursor>)> {
        let needle = search.map(str::to_lowercase);
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| match &needle {
                Some(n) => {
                    u.email.lookup_key().contains(n)
                        || u.details.first_name.as_str().to_lowercase().contains(n)
                        || u.details.last_name.as_str().to_lowercase().contains(n)
                }
                None => true,
            })
            .filter(|u| match cursor {
                Some(c) => (u.date_joined, u.id.0) < (c.created_at, c.id),
                None => true,
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| (b.date_joined, b.id.0).cmp(&(a.date_joined, a.id.0)));
        Ok(page(users, limit, |u| ListCursor::new(u.date_joined, u.id.0)))
    }
}

/// Split `items` (already ordered) into one page plus the cursor of its last
/// row when more rows follow.
pub fn page<T>(
    mut items: Vec<T>,
    limit: u32,
    cursor_of: impl Fn(&T) -> ListCursor,
) -> (Vec<T>, Option<ListCursor>) {
    let limit = limit as usize;
    if items.len() > limit {
        items.truncate(limit);
        let next = items.last().map(cursor_of);
        (items, next)
    } else {
        (items, None)
    }
}

/* -------------------------------- Addresses -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemoryAddressRepo {
    addresses: Mutex<BTreeMap<i64, Address>>,
}

impl InMemoryAddressRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AddressRepository for InMemoryAddressRepo {
    async fn insert(&self, address: NewAddress) -> DomainResult<Address> {
        let mut addresses = self.addresses.lock().unwrap();
        let id = addresses.keys().next_back().copied().unwrap_or(0) + 1;
        let stored = Address {
            id: AddressId(id),
            user_id: address.user_id,
            postal: address.postal,
            created_at: address.created_at,
            updated_at: address.created_at,
        };
        addresses.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: AddressId,
        postal: PostalAddress,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Address> {
        let mut addresses = self.addresses.lock().unwrap();
        let address = addresses
            .get_mut(&id.0)
            .ok_or_else(|| DomainError::NotFound("address not found".into()))?;
        address.postal = postal;
        address.updated_at = updated_at;
        Ok(address.clone())
    }

    async fn delete(&self, id: AddressId) -> DomainResult<()> {
        self.addresses
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("address not found".into()))
    }

    async fn find_by_id(&self, id: AddressId) -> DomainResult<Option<Address>> {
        Ok(self.addresses.lock().unwrap().get(&id.0).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Address>> {
        Ok(self
            .addresses
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }
}

/* -------------------------------- Settings -------------------------------- */

#[derive(Debug, Default)]
pub struct InMemorySettingsRepo {
    settings: Mutex<BTreeMap<i64, UserSettings>>,
    fail_calls: bool,
}

impl InMemorySettingsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every trait call fails with a persistence error.
    pub fn failing() -> Self {
        Self {
            fail_calls: true,
            ..Self::default()
        }
    }

    /// Written alongside a user insert, like the Postgres adapter does.
    pub fn store_defaults(&self, user_id: UserId, now: DateTime<Utc>) {
        self.settings
            .lock()
            .unwrap()
            .entry(user_id.0)
            .or_insert_with(|| UserSettings::defaults_for(user_id, now));
    }

    pub fn get(&self, user_id: i64) -> Option<UserSettings> {
        self.settings.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl UserSettingsRepository for InMemorySettingsRepo {
    async fn get_or_create(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<UserSettings> {
        if self.fail_calls {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        Ok(self
            .settings
            .lock()
            .unwrap()
            .entry(user_id.0)
            .or_insert_with(|| UserSettings::defaults_for(user_id, now))
            .clone())
    }

    async fn update(
        &self,
        user_id: UserId,
        patch: PreferencesPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<UserSettings> {
        if self.fail_calls {
            return Err(DomainError::Persistence("connection reset".into()));
        }
        let mut settings = self.settings.lock().unwrap();
        let current = settings
            .get_mut(&user_id.0)
            .ok_or_else(|| DomainError::NotFound("settings not found".into()))?;
        current.preferences = patch.apply(current.preferences);
        current.updated_at = now;
        Ok(current.clone())
    }
}
