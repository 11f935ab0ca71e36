//! Rating Service
//!
//! Ratings hang off a drill; every operation first checks that the drill
//! (or the rating itself) exists.

use super::{require_drill, DrillRepositoryPort};
use crate::validation::CreateRatingRequest;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use drill_catalog_domain::rating::{NewRating, Rating};
use drill_catalog_domain::identifiers::{DrillId, RatingId};
use std::sync::Arc;
use tracing::{info, instrument};

/// Rating repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait RatingRepositoryPort: Send + Sync {
    /// Store a new rating
    async fn create(&self, rating: &NewRating) -> ApplicationResult<Rating>;

    /// Load a rating
    async fn get(&self, id: RatingId) -> ApplicationResult<Option<Rating>>;

    /// Ratings of a drill, newest first
    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Rating>>;

    /// Remove a rating; `false` if it was absent
    async fn delete(&self, id: RatingId) -> ApplicationResult<bool>;
}

/// Rating service implementation
pub struct RatingService<R, D>
where
    R: RatingRepositoryPort,
    D: DrillRepositoryPort,
{
    ratings: Arc<R>,
    drills: Arc<D>,
}

impl<R, D> RatingService<R, D>
where
    R: RatingRepositoryPort,
    D: DrillRepositoryPort,
{
    pub fn new(ratings: Arc<R>, drills: Arc<D>) -> Self {
        Self { ratings, drills }
    }

    /// List the ratings of a drill, newest first
    #[instrument(skip(self))]
    pub async fn list_ratings(&self, drill_id: &str) -> ApplicationResult<Vec<Rating>> {
        let drill_id = require_drill(self.drills.as_ref(), drill_id).await?;
        self.ratings.list_for_drill(drill_id).await
    }

    /// Add a rating to a drill
    #[instrument(skip(self, request))]
    pub async fn add_rating(
        &self,
        drill_id: &str,
        request: CreateRatingRequest,
    ) -> ApplicationResult<Rating> {
        let drill_id = require_drill(self.drills.as_ref(), drill_id).await?;
        let new_rating = request.into_new_rating(drill_id)?;

        let rating = self.ratings.create(&new_rating).await?;

        info!(rating_id = %rating.id, drill_id = %drill_id, "Rating added");
        Ok(rating)
    }

    /// Delete a rating
    #[instrument(skip(self))]
    pub async fn delete_rating(&self, rating_id: &str) -> ApplicationResult<()> {
        let rating_id = RatingId::parse(rating_id)?;

        let rating = self
            .ratings
            .get(rating_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RatingId::KIND))?;

        if !self.ratings.delete(rating.id).await? {
            return Err(ApplicationError::not_found(RatingId::KIND));
        }

        info!(rating_id = %rating.id, drill_id = %rating.drill_id, "Rating deleted");
        Ok(())
    }
}
