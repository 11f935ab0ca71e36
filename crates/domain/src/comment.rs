//! Comments attached to drills.

use crate::identifiers::{CommentId, DrillId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted comment text, in characters
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// A stored comment. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier
    pub id: CommentId,
    /// Owning drill
    pub drill_id: DrillId,
    /// Comment text
    pub comment: String,
    /// Author name
    pub created_by_name: String,
    /// Legacy column, always empty
    pub created_by_email: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// A comment that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Owning drill
    pub drill_id: DrillId,
    /// Comment text
    pub comment: String,
    /// Author name
    pub created_by_name: String,
}

impl NewComment {
    /// Materialize the stored record once the store has assigned identity
    pub fn into_comment(self, id: CommentId, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id,
            drill_id: self.drill_id,
            comment: self.comment,
            created_by_name: self.created_by_name,
            created_by_email: String::new(),
            created_at,
        }
    }
}
