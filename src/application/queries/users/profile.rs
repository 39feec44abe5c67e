use super::UserQueryService;
use crate::application::{
    dto::{AuthenticatedUser, UserProfileDto, UserSettingsDto},
    error::{ApplicationError, ApplicationResult},
};

impl UserQueryService {
    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .user_repo
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("user not found"))?;

        let now = self.clock.now();
        let addresses = self.address_repo.list_for_user(user.id).await?;
        let settings = self.settings_repo.get_or_create(user.id, now).await?;

        Ok(UserProfileDto::from_parts(user, addresses, settings, actor, now))
    }

    /// Creates the default settings on first access.
    pub async fn get_settings(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserSettingsDto> {
        let settings = self
            .settings_repo
            .get_or_create(actor.id, self.clock.now())
            .await?;
        Ok(settings.into())
    }
}
