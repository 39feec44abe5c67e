// src/infrastructure/repositories/postgres_user.rs
use super::error::{like_pattern, map_sqlx};
use super::postgres_settings::insert_default_settings;
use crate::domain::cursor::ListCursor;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{
    Email, FirstName, LastName, NewUser, PasswordHash, PersonalDetails, PhoneNumber, User, UserId,
    UserRepository, UserUpdate,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone_number, \
     date_of_birth, is_active, is_staff, is_superuser, date_joined, last_login";

/// Two rows are enough to tell a unique match from an ambiguous one.
const EMAIL_MATCH_LIMIT: i64 = 2;

fn email_lookup_sql() -> String {
    format!(
        "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT $2"
    )
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn build_update_query(id: UserId, update: UserUpdate) -> QueryBuilder<'static, Postgres> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");

        if let Some(email) = update.email {
            fields.push("email = ").push_bind_unseparated(String::from(email));
        }
        if let Some(first_name) = update.first_name {
            fields
                .push("first_name = ")
                .push_bind_unseparated(String::from(first_name));
        }
        if let Some(last_name) = update.last_name {
            fields
                .push("last_name = ")
                .push_bind_unseparated(String::from(last_name));
        }
        if let Some(phone_number) = update.phone_number {
            fields
                .push("phone_number = ")
                .push_bind_unseparated(phone_number.map(String::from));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            fields
                .push("date_of_birth = ")
                .push_bind_unseparated(date_of_birth);
        }
        if let Some(is_active) = update.is_active {
            fields.push("is_active = ").push_bind_unseparated(is_active);
        }
        if let Some(is_staff) = update.is_staff {
            fields.push("is_staff = ").push_bind_unseparated(is_staff);
        }
        if let Some(password_hash) = update.password_hash {
            fields
                .push("password_hash = ")
                .push_bind_unseparated(String::from(password_hash));
        }
        if let Some(last_login) = update.last_login {
            fields
                .push("last_login = ")
                .push_bind_unseparated(last_login);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" RETURNING ");
        builder.push(USER_COLUMNS);
        builder
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    date_of_birth: Option<NaiveDate>,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id)?,
            email: Email::new(row.email)?,
            password_hash: PasswordHash::new(row.password_hash)?,
            details: PersonalDetails {
                first_name: FirstName::new(row.first_name)?,
                last_name: LastName::new(row.last_name)?,
                phone_number: row.phone_number.map(PhoneNumber::new).transpose()?,
                date_of_birth: row.date_of_birth,
            },
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            date_joined: row.date_joined,
            last_login: row.last_login,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let NewUser {
            email,
            password_hash,
            details,
            is_active,
            is_staff,
            is_superuser,
            date_joined,
        } = new_user;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let sql = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name, phone_number, \
             date_of_birth, is_active, is_staff, is_superuser, date_joined) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .bind(password_hash.as_str())
            .bind(details.first_name.as_str())
            .bind(details.last_name.as_str())
            .bind(details.phone_number.as_ref().map(PhoneNumber::as_str))
            .bind(details.date_of_birth)
            .bind(is_active)
            .bind(is_staff)
            .bind(is_superuser)
            .bind(date_joined)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let user = User::try_from(row)?;
        insert_default_settings(&mut tx, user.id, user.date_joined).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email_ignore_case(&self, email: &str) -> DomainResult<Vec<User>> {
        let sql = email_lookup_sql();
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.trim())
            .bind(EMAIL_MATCH_LIMIT)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, id: UserId, update: UserUpdate) -> DomainResult<User> {
        if update.is_empty() {
            return Err(DomainError::validation("no fields provided for update"));
        }

        let row = Self::build_update_query(id, update)
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;

        User::try_from(row)
    }

    async fn delete(&self, id: UserId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("user not found".into()));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        limit: u32,
        cursor: Option<ListCursor>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<User>, Option<ListCursor>)> {
        let limit = limit.clamp(1, 100);
        let fetch_limit = i64::from(limit) + 1;
        let pattern = like_pattern(search);

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        builder.push(USER_COLUMNS);
        builder.push(" FROM users WHERE TRUE");

        if let Some(pattern) = pattern {
            builder.push(" AND (email ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR first_name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR last_name ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(cursor) = cursor {
            builder.push(" AND (date_joined, id) < (");
            builder.push_bind(cursor.created_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }

        builder.push(" ORDER BY date_joined DESC, id DESC LIMIT ");
        builder.push_bind(fetch_limit);

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let next_cursor = if users.len() > limit as usize {
            users.pop();
            users
                .last()
                .map(|user| ListCursor::new(user.date_joined, user.id.into()))
        } else {
            None
        };

        Ok((users, next_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_lookup_is_case_insensitive_and_capped_at_two_rows() {
        let sql = email_lookup_sql();
        assert!(sql.contains("LOWER(email) = LOWER($1)"));
        assert!(sql.ends_with("ORDER BY id LIMIT $2"));
        assert_eq!(EMAIL_MATCH_LIMIT, 2);
    }
}
