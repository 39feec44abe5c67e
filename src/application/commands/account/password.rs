use super::AccountCommandService;
use crate::{
    application::{
        commands::{capability::ensure_capability, users::password::validate_password},
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{PasswordHash, UserUpdate},
};
use tracing::info;

pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
}

impl AccountCommandService {
    pub async fn change_password(
        &self,
        actor: &AuthenticatedUser,
        command: ChangePasswordCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "account", "manage")?;

        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        self.password_hasher
            .verify(&command.current_password, user.password_hash.as_str())
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthorized(_) => {
                    ApplicationError::validation("current password is incorrect")
                }
                other => other,
            })?;

        validate_password(&command.new_password)?;
        if command.new_password == command.current_password {
            return Err(ApplicationError::validation(
                "new password must differ from the current one",
            ));
        }

        let hashed = self.password_hasher.hash(&command.new_password).await?;
        let update = UserUpdate::default().with_password_hash(PasswordHash::new(hashed)?);
        self.user_repo.update(actor.id, update).await?;

        info!(user_id = %actor.id, "password changed");
        Ok(())
    }
}
