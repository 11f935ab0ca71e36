//! Rating repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use drill_catalog_application::{ApplicationResult, RatingRepositoryPort};
use drill_catalog_domain::{
    identifiers::{DrillId, RatingId},
    rating::{NewRating, Rating, Score},
};

use super::map_child_insert_error;
use crate::{Error, Result};

const RATING_COLUMNS: &str = "id, drill_id, score, created_by_name, created_by_email, created_at";

/// PostgreSQL implementation of the rating repository port.
pub struct PgRatingRepository {
    pool: PgPool,
}

impl PgRatingRepository {
    /// Create a new PostgreSQL rating repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a rating. Fails with `NotFound` if the drill is gone.
    #[instrument(skip(self, rating), fields(drill_id = %rating.drill_id, score = %rating.score))]
    pub async fn insert(&self, rating: &NewRating) -> Result<Rating> {
        let sql = format!(
            "INSERT INTO drill_ratings (drill_id, score, created_by_name) \
             VALUES ($1, $2, $3) RETURNING {}",
            RATING_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(rating.drill_id.as_uuid())
            .bind(rating.score.value())
            .bind(&rating.created_by_name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_child_insert_error)?;

        let rating = row_to_rating(&row)?;
        debug!(rating_id = %rating.id, "Inserted rating");
        Ok(rating)
    }

    /// Find a rating by id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: RatingId) -> Result<Option<Rating>> {
        let sql = format!("SELECT {} FROM drill_ratings WHERE id = $1", RATING_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_rating).transpose()
    }

    /// Ratings for a drill, newest first.
    #[instrument(skip(self))]
    pub async fn find_by_drill(&self, drill_id: DrillId) -> Result<Vec<Rating>> {
        let sql = format!(
            "SELECT {} FROM drill_ratings WHERE drill_id = $1 ORDER BY created_at DESC, id DESC",
            RATING_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(drill_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_rating).collect()
    }

    /// Delete a rating by id.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: RatingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drill_ratings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RatingRepositoryPort for PgRatingRepository {
    async fn create(&self, rating: &NewRating) -> ApplicationResult<Rating> {
        Ok(self.insert(rating).await?)
    }

    async fn get(&self, id: RatingId) -> ApplicationResult<Option<Rating>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Rating>> {
        Ok(self.find_by_drill(drill_id).await?)
    }

    async fn delete(&self, id: RatingId) -> ApplicationResult<bool> {
        Ok(self.remove(id).await?)
    }
}

fn row_to_rating(row: &PgRow) -> Result<Rating> {
    let score = Score::new(row.try_get("score")?)
        .map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))?;

    Ok(Rating {
        id: RatingId::from(row.try_get::<Uuid, _>("id")?),
        drill_id: DrillId::from(row.try_get::<Uuid, _>("drill_id")?),
        score,
        created_by_name: row.try_get("created_by_name")?,
        created_by_email: row.try_get("created_by_email")?,
        created_at: row.try_get("created_at")?,
    })
}
