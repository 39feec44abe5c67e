use super::AccountCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
    },
    domain::user::UserUpdate,
};
use tracing::info;

impl AccountCommandService {
    /// Keeps the account's data but blocks future logins.
    pub async fn deactivate(&self, actor: &AuthenticatedUser) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "account", "manage")?;

        let user = self
            .user_repo
            .update(actor.id, UserUpdate::default().with_is_active(false))
            .await?;
        info!(user_id = %user.id, "account deactivated");
        Ok(user.into())
    }

    /// Addresses and settings go with the account.
    pub async fn delete_account(&self, actor: &AuthenticatedUser) -> ApplicationResult<()> {
        ensure_capability(actor, "account", "manage")?;

        self.user_repo.delete(actor.id).await?;
        info!(user_id = %actor.id, "account deleted");
        Ok(())
    }
}
