mod addresses;
mod lifecycle;
mod password;
mod profile;
mod service;
mod settings;

pub use addresses::AddressCommand;
pub use password::ChangePasswordCommand;
pub use profile::UpdateProfileCommand;
pub use service::AccountCommandService;
pub use settings::UpdateSettingsCommand;
