use super::UserQueryService;
use crate::application::{
    commands::capability::ensure_capability,
    dto::{AuthenticatedUser, CursorPage, UserDto, pagination::normalize_limit},
    error::ApplicationResult,
    queries::decode_cursor,
};

pub struct ListUsersQuery {
    pub limit: u32,
    pub cursor: Option<String>,
    pub q: Option<String>,
}

impl UserQueryService {
    pub async fn list_users(
        &self,
        actor: &AuthenticatedUser,
        query: ListUsersQuery,
    ) -> ApplicationResult<CursorPage<UserDto>> {
        ensure_capability(actor, "users", "read")?;

        let limit = normalize_limit(query.limit);
        let cursor = decode_cursor(query.cursor.as_deref())?;
        let search = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());

        let (users, next_cursor) = self.user_repo.list_page(limit, cursor, search).await?;

        Ok(CursorPage::from_domain(
            users,
            next_cursor.map(|cursor| cursor.encode()),
        ))
    }
}
