use super::UserCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{UserId, UserUpdate},
};
use tracing::info;

/// Staff-side change of another account's flags.
pub struct UpdateUserCommand {
    pub user_id: i64,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "update")?;

        let user_id = UserId::new(command.user_id)?;
        if command.is_active.is_none() && command.is_staff.is_none() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }
        if user_id == actor.id && command.is_active == Some(false) {
            return Err(ApplicationError::validation(
                "use account deactivation to disable your own account",
            ));
        }

        let mut update = UserUpdate::default();
        if let Some(is_active) = command.is_active {
            update = update.with_is_active(is_active);
        }
        if let Some(is_staff) = command.is_staff {
            update = update.with_is_staff(is_staff);
        }

        let user = self.user_repo.update(user_id, update).await?;
        info!(user_id = %user.id, actor_id = %actor.id, "account flags updated");
        Ok(user.into())
    }
}
