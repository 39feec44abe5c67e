use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, TokenSubject, UserDto},
        error::ApplicationResult,
    },
    domain::user::UserUpdate,
};
use tracing::info;

pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let user = self
            .credentials
            .resolve(&command.email, &command.password)
            .await?;

        let user = self
            .user_repo
            .update(user.id, UserUpdate::default().with_last_login(self.clock.now()))
            .await?;

        let token = self.token_manager.issue(TokenSubject::from(&user)).await?;
        info!(user_id = %user.id, "user logged in");

        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }
}
