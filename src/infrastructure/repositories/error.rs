use crate::domain::errors::DomainError;

const CNT_USER_EMAIL: &str = "users_email_lower_key";
const CNT_CATEGORY_SLUG: &str = "categories_slug_key";
const CNT_CATEGORY_NAME: &str = "categories_name_key";
const CNT_CATEGORY_OWN_PARENT: &str = "categories_not_own_parent_chk";
const CNT_CATEGORY_PARENT: &str = "categories_parent_id_fkey";
const CNT_TAG_SLUG: &str = "tags_slug_key";
const CNT_TAG_NAME: &str = "tags_name_key";
const CNT_PRODUCT_SLUG: &str = "products_slug_key";
const CNT_PRODUCT_CATEGORY: &str = "products_category_id_fkey";
const CNT_PRODUCT_PRICE: &str = "products_price_non_negative_chk";
const CNT_PRODUCT_TAG: &str = "product_tags_tag_id_fkey";
const CNT_ADDRESS_TYPE: &str = "addresses_type_chk";

/// Translate a sqlx error into the domain vocabulary, by constraint name
/// first and SQLSTATE second.
pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_CATEGORY_SLUG => DomainError::DuplicateSlug("category".into()),
                    CNT_TAG_SLUG => DomainError::DuplicateSlug("tag".into()),
                    CNT_PRODUCT_SLUG => DomainError::DuplicateSlug("product".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already registered".into()),
                    CNT_CATEGORY_NAME => {
                        DomainError::Conflict("category name already exists".into())
                    }
                    CNT_TAG_NAME => DomainError::Conflict("tag name already exists".into()),
                    CNT_CATEGORY_PARENT => {
                        DomainError::NotFound("parent category not found".into())
                    }
                    CNT_PRODUCT_CATEGORY => DomainError::NotFound("category not found".into()),
                    CNT_PRODUCT_TAG => DomainError::NotFound("tag not found".into()),
                    CNT_CATEGORY_OWN_PARENT => {
                        DomainError::Validation("a category cannot be its own parent".into())
                    }
                    CNT_PRODUCT_PRICE => {
                        DomainError::Validation("price cannot be negative".into())
                    }
                    CNT_ADDRESS_TYPE => DomainError::Validation("unknown address type".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Turn an `ILIKE` search term into a contains-pattern, escaping wildcards.
pub(super) fn like_pattern(search: Option<&str>) -> Option<String> {
    search.map(str::trim).filter(|s| !s.is_empty()).map(|s| {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{escaped}%")
    })
}
