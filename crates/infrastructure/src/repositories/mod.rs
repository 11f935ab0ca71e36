//! Repository implementations for data persistence.
//!
//! PostgreSQL-backed implementations of the repository ports defined in the
//! application layer.

mod comment_repository;
mod drill_repository;
mod rating_repository;

pub use comment_repository::*;
pub use drill_repository::*;
pub use rating_repository::*;

use crate::Error;
use drill_catalog_application::ApplicationError;
use drill_catalog_domain::identifiers::DrillId;

/// SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map an insert error on a child table; a dangling `drill_id` means the
/// drill was deleted concurrently.
pub(crate) fn map_child_insert_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return Error::NotFound(ApplicationError::not_found(DrillId::KIND).to_string());
        }
    }
    Error::Database(err)
}

/// Escape LIKE wildcards so user text matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("pepper"), "pepper");
        assert_eq!(escape_like("100%_\\"), "100\\%\\_\\\\");
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = map_child_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, Error::Database(sqlx::Error::PoolTimedOut)));
    }
}
