//! Ratings attached to drills.

use crate::errors::ValidationError;
use crate::identifiers::{DrillId, RatingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rating score, 1 to 10 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(i32);

impl Score {
    /// Lowest accepted score
    pub const MIN: i32 = 1;
    /// Highest accepted score
    pub const MAX: i32 = 10;

    /// Validate a raw score
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::ScoreOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    /// The raw value
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Score {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored rating. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Identifier
    pub id: RatingId,
    /// Owning drill
    pub drill_id: DrillId,
    /// Score given
    pub score: Score,
    /// Author name
    pub created_by_name: String,
    /// Legacy column, always null for new ratings
    pub created_by_email: Option<String>,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// A rating that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    /// Owning drill
    pub drill_id: DrillId,
    /// Score given
    pub score: Score,
    /// Author name
    pub created_by_name: String,
}

impl NewRating {
    /// Materialize the stored record once the store has assigned identity
    pub fn into_rating(self, id: RatingId, created_at: DateTime<Utc>) -> Rating {
        Rating {
            id,
            drill_id: self.drill_id,
            score: self.score,
            created_by_name: self.created_by_name,
            created_by_email: None,
            created_at,
        }
    }
}
