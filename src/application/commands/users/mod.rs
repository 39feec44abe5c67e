mod login;
pub(crate) mod password;
mod register;
mod service;
mod update;

pub use login::{LoginResult, LoginUserCommand};
pub use register::{CreateSuperuserCommand, RegisterUserCommand};
pub use service::UserCommandService;
pub use update::UpdateUserCommand;
