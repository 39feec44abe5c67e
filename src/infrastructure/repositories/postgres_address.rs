use super::error::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Address, AddressId, AddressRepository, NewAddress, PostalAddress, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const ADDRESS_COLUMNS: &str =
    "id, user_id, address_type, street, city, state, postal_code, country, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AddressRow {
    id: i64,
    user_id: i64,
    address_type: String,
    street: String,
    city: String,
    state: String,
    postal_code: Option<String>,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AddressRow> for Address {
    type Error = DomainError;

    fn try_from(row: AddressRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressId::new(row.id)?,
            user_id: UserId::new(row.user_id)?,
            postal: PostalAddress::new(
                row.address_type.parse()?,
                row.street,
                row.city,
                row.state,
                row.postal_code,
                row.country,
            )?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn insert(&self, address: NewAddress) -> DomainResult<Address> {
        let NewAddress {
            user_id,
            postal,
            created_at,
        } = address;

        let sql = format!(
            "INSERT INTO addresses (user_id, address_type, street, city, state, postal_code, \
             country, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING {ADDRESS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(i64::from(user_id))
            .bind(postal.kind.as_str())
            .bind(postal.street)
            .bind(postal.city)
            .bind(postal.state)
            .bind(postal.postal_code)
            .bind(postal.country)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Address::try_from(row)
    }

    async fn update(
        &self,
        id: AddressId,
        postal: PostalAddress,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Address> {
        let sql = format!(
            "UPDATE addresses SET address_type = $2, street = $3, city = $4, state = $5, \
             postal_code = $6, country = $7, updated_at = $8 \
             WHERE id = $1 RETURNING {ADDRESS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(i64::from(id))
            .bind(postal.kind.as_str())
            .bind(postal.street)
            .bind(postal.city)
            .bind(postal.state)
            .bind(postal.postal_code)
            .bind(postal.country)
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("address not found".into()))?;

        Address::try_from(row)
    }

    async fn delete(&self, id: AddressId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("address not found".into()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: AddressId) -> DomainResult<Option<Address>> {
        let sql = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1");
        let row = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Address::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: UserId) -> DomainResult<Vec<Address>> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE user_id = $1 ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, AddressRow>(&sql)
            .bind(i64::from(user_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Address::try_from).collect()
    }
}
