pub mod catalog;
pub mod cursor;
pub mod errors;
pub mod slug;
pub mod user;
