pub mod catalog;
pub mod users;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::cursor::ListCursor,
};

fn decode_cursor(token: Option<&str>) -> ApplicationResult<Option<ListCursor>> {
    match token.filter(|value| !value.is_empty()) {
        Some(value) => ListCursor::decode(value)
            .map(Some)
            .map_err(ApplicationError::from),
        None => Ok(None),
    }
}
