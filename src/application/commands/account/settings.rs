use super::AccountCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserSettingsDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::PreferencesPatch,
};

pub struct UpdateSettingsCommand {
    pub patch: PreferencesPatch,
}

impl AccountCommandService {
    pub async fn update_settings(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateSettingsCommand,
    ) -> ApplicationResult<UserSettingsDto> {
        ensure_capability(actor, "account", "manage")?;

        if command.patch.is_empty() {
            return Err(ApplicationError::validation(
                "at least one setting must be provided",
            ));
        }

        let now = self.clock.now();
        self.settings_repo.get_or_create(actor.id, now).await?;
        let settings = self
            .settings_repo
            .update(actor.id, command.patch, now)
            .await?;
        Ok(settings.into())
    }
}
