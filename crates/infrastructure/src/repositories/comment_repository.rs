//! Comment repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use drill_catalog_application::{ApplicationResult, CommentRepositoryPort};
use drill_catalog_domain::{
    comment::{Comment, NewComment},
    identifiers::{CommentId, DrillId},
};

use super::map_child_insert_error;
use crate::Result;

const COMMENT_COLUMNS: &str =
    "id, drill_id, comment, created_by_name, created_by_email, created_at";

/// PostgreSQL implementation of the comment repository port.
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PostgreSQL comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment. Fails with `NotFound` if the drill is gone.
    #[instrument(skip(self, comment), fields(drill_id = %comment.drill_id))]
    pub async fn insert(&self, comment: &NewComment) -> Result<Comment> {
        let sql = format!(
            "INSERT INTO drill_comments (drill_id, comment, created_by_name, created_by_email) \
             VALUES ($1, $2, $3, '') RETURNING {}",
            COMMENT_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(comment.drill_id.as_uuid())
            .bind(&comment.comment)
            .bind(&comment.created_by_name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_child_insert_error)?;

        let comment = row_to_comment(&row)?;
        debug!(comment_id = %comment.id, "Inserted comment");
        Ok(comment)
    }

    /// Find a comment by id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        let sql = format!("SELECT {} FROM drill_comments WHERE id = $1", COMMENT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_comment).transpose()
    }

    /// Comments for a drill, newest first.
    #[instrument(skip(self))]
    pub async fn find_by_drill(&self, drill_id: DrillId) -> Result<Vec<Comment>> {
        let sql = format!(
            "SELECT {} FROM drill_comments WHERE drill_id = $1 ORDER BY created_at DESC, id DESC",
            COMMENT_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(drill_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_comment).collect()
    }

    /// Delete a comment by id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: CommentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drill_comments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepositoryPort for PgCommentRepository {
    async fn create(&self, comment: &NewComment) -> ApplicationResult<Comment> {
        Ok(self.insert(comment).await?)
    }

    async fn get(&self, id: CommentId) -> ApplicationResult<Option<Comment>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Comment>> {
        Ok(self.find_by_drill(drill_id).await?)
    }

    async fn delete(&self, id: CommentId) -> ApplicationResult<bool> {
        Ok(self.remove(id).await?)
    }
}

fn row_to_comment(row: &PgRow) -> Result<Comment> {
    Ok(Comment {
        id: CommentId::from(row.try_get::<Uuid, _>("id")?),
        drill_id: DrillId::from(row.try_get::<Uuid, _>("drill_id")?),
        comment: row.try_get("comment")?,
        created_by_name: row.try_get("created_by_name")?,
        created_by_email: row
            .try_get::<Option<String>, _>("created_by_email")?
            .unwrap_or_default(),
        created_at: row.try_get("created_at")?,
    })
}
