pub mod account;
pub mod catalog;
pub(crate) mod capability;
pub mod users;
