// src/domain/user/settings.rs
use crate::domain::user::value_objects::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Preferences {
    pub receive_emails: bool,
    pub dark_mode: bool,
    pub show_email_publicly: bool,
    pub show_phone_number_publicly: bool,
    pub show_date_of_birth_publicly: bool,
    pub show_profile_image_publicly: bool,
    pub show_full_name_publicly: bool,
    pub show_last_login: bool,
    pub show_date_joined: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            receive_emails: true,
            dark_mode: false,
            show_email_publicly: false,
            show_phone_number_publicly: false,
            show_date_of_birth_publicly: false,
            show_profile_image_publicly: false,
            show_full_name_publicly: false,
            show_last_login: false,
            show_date_joined: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserSettings {
    pub user_id: UserId,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    pub fn defaults_for(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; `None` leaves a flag untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferencesPatch {
    pub receive_emails: Option<bool>,
    pub dark_mode: Option<bool>,
    pub show_email_publicly: Option<bool>,
    pub show_phone_number_publicly: Option<bool>,
    pub show_date_of_birth_publicly: Option<bool>,
    pub show_profile_image_publicly: Option<bool>,
    pub show_full_name_publicly: Option<bool>,
    pub show_last_login: Option<bool>,
    pub show_date_joined: Option<bool>,
}

impl PreferencesPatch {
    pub const fn is_empty(&self) -> bool {
        self.receive_emails.is_none()
            && self.dark_mode.is_none()
            && self.show_email_publicly.is_none()
            && self.show_phone_number_publicly.is_none()
            && self.show_date_of_birth_publicly.is_none()
            && self.show_profile_image_publicly.is_none()
            && self.show_full_name_publicly.is_none()
            && self.show_last_login.is_none()
            && self.show_date_joined.is_none()
    }

    pub fn apply(&self, prefs: Preferences) -> Preferences {
        Preferences {
            receive_emails: self.receive_emails.unwrap_or(prefs.receive_emails),
            dark_mode: self.dark_mode.unwrap_or(prefs.dark_mode),
            show_email_publicly: self.show_email_publicly.unwrap_or(prefs.show_email_publicly),
            show_phone_number_publicly: self
                .show_phone_number_publicly
                .unwrap_or(prefs.show_phone_number_publicly),
            show_date_of_birth_publicly: self
                .show_date_of_birth_publicly
                .unwrap_or(prefs.show_date_of_birth_publicly),
            show_profile_image_publicly: self
                .show_profile_image_publicly
                .unwrap_or(prefs.show_profile_image_publicly),
            show_full_name_publicly: self
                .show_full_name_publicly
                .unwrap_or(prefs.show_full_name_publicly),
            show_last_login: self.show_last_login.unwrap_or(prefs.show_last_login),
            show_date_joined: self.show_date_joined.unwrap_or(prefs.show_date_joined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_opt_into_email_only() {
        let prefs = Preferences::default();
        assert!(prefs.receive_emails);
        assert!(!prefs.dark_mode);
        assert!(!prefs.show_email_publicly);
    }

    #[test]
    fn patch_only_touches_given_flags() {
        let patch = PreferencesPatch {
            dark_mode: Some(true),
            receive_emails: Some(false),
            ..PreferencesPatch::default()
        };
        let prefs = patch.apply(Preferences::default());
        assert!(prefs.dark_mode);
        assert!(!prefs.receive_emails);
        assert!(!prefs.show_date_joined);
    }
}
