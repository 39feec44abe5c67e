use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{
        Email, FirstName, LastName, NewUser, PasswordHash, PersonalDetails, PhoneNumber, User,
    },
};
use chrono::NaiveDate;
use tracing::info;

pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

pub struct CreateSuperuserCommand {
    pub email: String,
    pub password: String,
    pub first_name: String,
}

impl UserCommandService {
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<UserDto> {
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        let details = PersonalDetails {
            first_name: FirstName::new(command.first_name)?,
            last_name: command
                .last_name
                .map(LastName::new)
                .transpose()?
                .unwrap_or_default(),
            phone_number: command
                .phone_number
                .filter(|p| !p.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?,
            date_of_birth: command.date_of_birth,
        };
        if let Some(dob) = details.date_of_birth {
            if dob > self.clock.today() {
                return Err(ApplicationError::validation(
                    "date of birth cannot be in the future",
                ));
            }
        }

        self.ensure_email_available(&email).await?;
        let password_hash = self.hash_password(&command.password).await?;
        let user = self
            .insert_with_settings(NewUser::customer(
                email,
                password_hash,
                details,
                self.clock.now(),
            ))
            .await?;

        info!(user_id = %user.id, "registered customer account");
        Ok(user.into())
    }

    pub async fn create_superuser(
        &self,
        command: CreateSuperuserCommand,
    ) -> ApplicationResult<UserDto> {
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        let details = PersonalDetails {
            first_name: FirstName::new(command.first_name)?,
            last_name: LastName::default(),
            phone_number: None,
            date_of_birth: None,
        };

        self.ensure_email_available(&email).await?;
        let password_hash = self.hash_password(&command.password).await?;
        let user = self
            .insert_with_settings(NewUser::superuser(
                email,
                password_hash,
                details,
                self.clock.now(),
            ))
            .await?;

        info!(user_id = %user.id, "created superuser account");
        Ok(user.into())
    }

    async fn ensure_email_available(&self, email: &Email) -> ApplicationResult<()> {
        let existing = self
            .user_repo
            .find_by_email_ignore_case(email.as_str())
            .await?;
        if existing.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::conflict("email already registered"))
        }
    }

    async fn hash_password(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let hashed = self.password_hasher.hash(password).await?;
        Ok(PasswordHash::new(hashed)?)
    }

    async fn insert_with_settings(&self, new_user: NewUser) -> ApplicationResult<User> {
        Ok(self.user_repo.insert(new_user).await?)
    }
}
