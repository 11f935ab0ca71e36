//! Rating requests

use super::FieldErrors;
use crate::ApplicationResult;
use drill_catalog_domain::identifiers::DrillId;
use drill_catalog_domain::rating::{NewRating, Score};

/// Create rating request validation
#[derive(Debug, Clone, Default)]
pub struct CreateRatingRequest {
    pub score: i32,
    pub created_by_name: String,
}

impl CreateRatingRequest {
    pub fn validate(&self) -> ApplicationResult<()> {
        let mut errors = FieldErrors::new();
        if !(Score::MIN..=Score::MAX).contains(&self.score) {
            errors.add(
                "score",
                format!("Must be between {} and {}", Score::MIN, Score::MAX),
            );
        }
        errors.check_name(&self.created_by_name);
        errors.into_result()
    }

    /// Validate the request and attach it to `drill_id`
    pub fn into_new_rating(self, drill_id: DrillId) -> ApplicationResult<NewRating> {
        self.validate()?;

        Ok(NewRating {
            drill_id,
            score: Score::new(self.score)?,
            created_by_name: self.created_by_name.trim().to_string(),
        })
    }
}
