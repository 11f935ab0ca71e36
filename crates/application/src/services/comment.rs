//! Comment Service
//!
//! Comments hang off a drill; every operation first checks that the drill
//! (or the comment itself) exists.

use super::{require_drill, DrillRepositoryPort};
use crate::validation::CreateCommentRequest;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use drill_catalog_domain::comment::{Comment, NewComment};
use drill_catalog_domain::identifiers::{CommentId, DrillId};
use std::sync::Arc;
use tracing::{info, instrument};

/// Comment repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait CommentRepositoryPort: Send + Sync {
    /// Store a new comment
    async fn create(&self, comment: &NewComment) -> ApplicationResult<Comment>;

    /// Load a comment
    async fn get(&self, id: CommentId) -> ApplicationResult<Option<Comment>>;

    /// Comments of a drill, newest first
    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Comment>>;

    /// Remove a comment; `false` if it was absent
    async fn delete(&self, id: CommentId) -> ApplicationResult<bool>;
}

/// Comment service implementation
pub struct CommentService<C, D>
where
    C: CommentRepositoryPort,
    D: DrillRepositoryPort,
{
    comments: Arc<C>,
    drills: Arc<D>,
}

impl<C, D> CommentService<C, D>
where
    C: CommentRepositoryPort,
    D: DrillRepositoryPort,
{
    pub fn new(comments: Arc<C>, drills: Arc<D>) -> Self {
        Self { comments, drills }
    }

    /// List the comments of a drill, newest first
    #[instrument(skip(self))]
    pub async fn list_comments(&self, drill_id: &str) -> ApplicationResult<Vec<Comment>> {
        let drill_id = require_drill(self.drills.as_ref(), drill_id).await?;
        self.comments.list_for_drill(drill_id).await
    }

    /// Add a comment to a drill
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        drill_id: &str,
        request: CreateCommentRequest,
    ) -> ApplicationResult<Comment> {
        let drill_id = require_drill(self.drills.as_ref(), drill_id).await?;
        let new_comment = request.into_new_comment(drill_id)?;

        let comment = self.comments.create(&new_comment).await?;

        info!(comment_id = %comment.id, drill_id = %drill_id, "Comment added");
        Ok(comment)
    }

    /// Delete a comment
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: &str) -> ApplicationResult<()> {
        let comment_id = CommentId::parse(comment_id)?;

        let comment = self
            .comments
            .get(comment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(CommentId::KIND))?;

        if !self.comments.delete(comment.id).await? {
            return Err(ApplicationError::not_found(CommentId::KIND));
        }

        info!(comment_id = %comment.id, drill_id = %comment.drill_id, "Comment deleted");
        Ok(())
    }
}
