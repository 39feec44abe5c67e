use super::AccountCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{Email, FirstName, LastName, PhoneNumber, UserUpdate},
};
use chrono::NaiveDate;

/// Absent fields are left unchanged. `phone_number: Some(None)` clears the
/// stored number.
#[derive(Debug, Default)]
pub struct UpdateProfileCommand {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<Option<String>>,
    pub date_of_birth: Option<Option<NaiveDate>>,
}

impl AccountCommandService {
    pub async fn update_profile(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateProfileCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "account", "manage")?;

        let mut update = UserUpdate::default();
        if let Some(email) = command.email {
            let email = Email::new(email)?;
            self.ensure_email_free_for(actor, &email).await?;
            update = update.with_email(email);
        }
        if let Some(first_name) = command.first_name {
            update = update.with_first_name(FirstName::new(first_name)?);
        }
        if let Some(last_name) = command.last_name {
            update = update.with_last_name(LastName::new(last_name)?);
        }
        if let Some(phone_number) = command.phone_number {
            let phone_number = phone_number
                .filter(|p| !p.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?;
            update = update.with_phone_number(phone_number);
        }
        if let Some(date_of_birth) = command.date_of_birth {
            if date_of_birth.is_some_and(|dob| dob > self.clock.today()) {
                return Err(ApplicationError::validation(
                    "date of birth cannot be in the future",
                ));
            }
            update = update.with_date_of_birth(date_of_birth);
        }

        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let user = self.user_repo.update(actor.id, update).await?;
        Ok(user.into())
    }

    async fn ensure_email_free_for(
        &self,
        actor: &AuthenticatedUser,
        email: &Email,
    ) -> ApplicationResult<()> {
        let holders = self
            .user_repo
            .find_by_email_ignore_case(email.as_str())
            .await?;
        if holders.iter().any(|user| user.id != actor.id) {
            return Err(ApplicationError::conflict("email already registered"));
        }
        Ok(())
    }
}
