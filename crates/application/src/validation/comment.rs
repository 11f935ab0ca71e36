//! Comment requests

use super::FieldErrors;
use crate::ApplicationResult;
use drill_catalog_domain::comment::{NewComment, MAX_COMMENT_LENGTH};
use drill_catalog_domain::identifiers::DrillId;

/// Create comment request validation
#[derive(Debug, Clone, Default)]
pub struct CreateCommentRequest {
    pub comment: String,
    pub created_by_name: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> ApplicationResult<()> {
        let mut errors = FieldErrors::new();
        errors.check_length("comment", &self.comment, 1, MAX_COMMENT_LENGTH);
        errors.check_name(&self.created_by_name);
        errors.into_result()
    }

    /// Validate the request and attach it to `drill_id`
    pub fn into_new_comment(self, drill_id: DrillId) -> ApplicationResult<NewComment> {
        self.validate()?;

        Ok(NewComment {
            drill_id,
            comment: self.comment,
            created_by_name: self.created_by_name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_bounds() {
        let valid = CreateCommentRequest {
            comment: "x".to_string(),
            created_by_name: "Bob".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateCommentRequest {
            comment: String::new(),
            ..valid.clone()
        };
        assert!(empty.validate().is_err());

        let long = CreateCommentRequest {
            comment: "a".repeat(MAX_COMMENT_LENGTH + 1),
            ..valid.clone()
        };
        assert!(long.validate().is_err());

        let at_limit = CreateCommentRequest {
            comment: "a".repeat(MAX_COMMENT_LENGTH),
            ..valid
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_into_new_comment_trims_name() {
        let comment = CreateCommentRequest {
            comment: "Great drill".to_string(),
            created_by_name: "  Bob ".to_string(),
        }
        .into_new_comment(DrillId::new())
        .unwrap();
        assert_eq!(comment.created_by_name, "Bob");
    }
}
