use super::error::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::{Preferences, PreferencesPatch, UserId, UserSettings, UserSettingsRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

const SETTINGS_COLUMNS: &str = "user_id, receive_emails, dark_mode, show_email_publicly, \
     show_phone_number_publicly, show_date_of_birth_publicly, show_profile_image_publicly, \
     show_full_name_publicly, show_last_login, show_date_joined, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresUserSettingsRepository {
    pool: PgPool,
}

impl PostgresUserSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Default settings for a freshly inserted account, written on the caller's
/// connection so it can share the account's transaction.
pub(super) async fn insert_default_settings(
    conn: &mut PgConnection,
    user_id: UserId,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let defaults = Preferences::default();
    sqlx::query(
        "INSERT INTO user_settings (user_id, receive_emails, dark_mode, show_email_publicly, \
         show_phone_number_publicly, show_date_of_birth_publicly, show_profile_image_publicly, \
         show_full_name_publicly, show_last_login, show_date_joined, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) \
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(i64::from(user_id))
    .bind(defaults.receive_emails)
    .bind(defaults.dark_mode)
    .bind(defaults.show_email_publicly)
    .bind(defaults.show_phone_number_publicly)
    .bind(defaults.show_date_of_birth_publicly)
    .bind(defaults.show_profile_image_publicly)
    .bind(defaults.show_full_name_publicly)
    .bind(defaults.show_last_login)
    .bind(defaults.show_date_joined)
    .bind(now)
    .execute(conn)
    .await
    .map_err(map_sqlx)?;

    Ok(())
}

#[derive(Debug, FromRow)]
#[allow(clippy::struct_excessive_bools)]
struct SettingsRow {
    user_id: i64,
    receive_emails: bool,
    dark_mode: bool,
    show_email_publicly: bool,
    show_phone_number_publicly: bool,
    show_date_of_birth_publicly: bool,
    show_profile_image_publicly: bool,
    show_full_name_publicly: bool,
    show_last_login: bool,
    show_date_joined: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SettingsRow> for UserSettings {
    type Error = DomainError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(row.user_id)?,
            preferences: Preferences {
                receive_emails: row.receive_emails,
                dark_mode: row.dark_mode,
                show_email_publicly: row.show_email_publicly,
                show_phone_number_publicly: row.show_phone_number_publicly,
                show_date_of_birth_publicly: row.show_date_of_birth_publicly,
                show_profile_image_publicly: row.show_profile_image_publicly,
                show_full_name_publicly: row.show_full_name_publicly,
                show_last_login: row.show_last_login,
                show_date_joined: row.show_date_joined,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserSettingsRepository for PostgresUserSettingsRepository {
    async fn get_or_create(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<UserSettings> {
        let defaults = Preferences::default();
        // The no-op update makes RETURNING yield the existing row on conflict.
        let sql = format!(
            "INSERT INTO user_settings (user_id, receive_emails, dark_mode, show_email_publicly, \
             show_phone_number_publicly, show_date_of_birth_publicly, show_profile_image_publicly, \
             show_full_name_publicly, show_last_login, show_date_joined, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {SETTINGS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(i64::from(user_id))
            .bind(defaults.receive_emails)
            .bind(defaults.dark_mode)
            .bind(defaults.show_email_publicly)
            .bind(defaults.show_phone_number_publicly)
            .bind(defaults.show_date_of_birth_publicly)
            .bind(defaults.show_profile_image_publicly)
            .bind(defaults.show_full_name_publicly)
            .bind(defaults.show_last_login)
            .bind(defaults.show_date_joined)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        UserSettings::try_from(row)
    }

    async fn update(
        &self,
        user_id: UserId,
        patch: PreferencesPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<UserSettings> {
        let sql = format!(
            "UPDATE user_settings SET \
             receive_emails = COALESCE($2, receive_emails), \
             dark_mode = COALESCE($3, dark_mode), \
             show_email_publicly = COALESCE($4, show_email_publicly), \
             show_phone_number_publicly = COALESCE($5, show_phone_number_publicly), \
             show_date_of_birth_publicly = COALESCE($6, show_date_of_birth_publicly), \
             show_profile_image_publicly = COALESCE($7, show_profile_image_publicly), \
             show_full_name_publicly = COALESCE($8, show_full_name_publicly), \
             show_last_login = COALESCE($9, show_last_login), \
             show_date_joined = COALESCE($10, show_date_joined), \
             updated_at = $11 \
             WHERE user_id = $1 RETURNING {SETTINGS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SettingsRow>(&sql)
            .bind(i64::from(user_id))
            .bind(patch.receive_emails)
            .bind(patch.dark_mode)
            .bind(patch.show_email_publicly)
            .bind(patch.show_phone_number_publicly)
            .bind(patch.show_date_of_birth_publicly)
            .bind(patch.show_profile_image_publicly)
            .bind(patch.show_full_name_publicly)
            .bind(patch.show_last_login)
            .bind(patch.show_date_joined)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("settings not found".into()))?;

        UserSettings::try_from(row)
    }
}
