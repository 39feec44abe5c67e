// src/domain/user/mod.rs
pub mod address;
pub mod entity;
pub mod repository;
pub mod settings;
pub mod value_objects;

pub use address::{Address, AddressId, AddressKind, NewAddress, PostalAddress};
pub use entity::{NewUser, PersonalDetails, User, UserUpdate};
pub use repository::{AddressRepository, UserRepository, UserSettingsRepository};
pub use settings::{Preferences, PreferencesPatch, UserSettings};
pub use value_objects::{
    Capability, Email, FirstName, LastName, PasswordHash, PhoneNumber, Role, UserId,
};
