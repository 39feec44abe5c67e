pub mod auth;
pub mod catalog;
pub mod pagination;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use catalog::{CategoryDetailDto, CategoryDto, ProductDto, TagDto};
pub use pagination::CursorPage;
pub use users::{AddressDto, CapabilityView, UserDto, UserProfileDto, UserSettingsDto};
