//! Response bodies.
//!
//! Wire shapes for drills, comments and ratings. Legacy evaluation columns
//! never leave the service; `tested` is always derived from ratings.

use chrono::{DateTime, Utc};
use drill_catalog_domain::{comment::Comment, drill::DrillSummary, rating::Rating};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Drill with its comment and rating aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrillResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub url: String,
    /// youtube, instagram, tiktok, vimeo or other
    #[schema(example = "youtube")]
    pub platform: String,
    pub video_id: Option<String>,
    pub levels: Vec<i32>,
    pub fundamentals: Vec<String>,
    pub drill_types: Vec<String>,
    pub coach_participates: Option<bool>,
    pub good_for_many_players: Option<bool>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub notes: Option<String>,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub comments_count: i64,
    pub ratings_count: i64,
    /// Mean score, null until the drill is rated
    pub avg_rating: Option<f64>,
    /// True once the drill has at least one rating
    pub tested: bool,
}

impl From<DrillSummary> for DrillResponse {
    fn from(summary: DrillSummary) -> Self {
        let DrillSummary { drill, stats } = summary;
        Self {
            id: drill.id.into_uuid(),
            title: drill.title,
            url: drill.url,
            platform: drill.platform.as_str().to_string(),
            video_id: drill.video_id,
            levels: drill.levels,
            fundamentals: drill.fundamentals,
            drill_types: drill.drill_types,
            coach_participates: drill.coach_participates,
            good_for_many_players: drill.good_for_many_players,
            min_players: drill.min_players,
            max_players: drill.max_players,
            notes: drill.notes,
            created_by_name: drill.created_by_name,
            created_at: drill.created_at,
            comments_count: stats.comments_count,
            ratings_count: stats.ratings_count,
            avg_rating: stats.avg_rating,
            tested: stats.tested(),
        }
    }
}

/// A comment on a drill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub drill_id: Uuid,
    pub comment: String,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.into_uuid(),
            drill_id: comment.drill_id.into_uuid(),
            comment: comment.comment,
            created_by_name: comment.created_by_name,
            created_at: comment.created_at,
        }
    }
}

/// A rating of a drill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub id: Uuid,
    pub drill_id: Uuid,
    #[schema(minimum = 1, maximum = 10)]
    pub score: i32,
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(rating: Rating) -> Self {
        Self {
            id: rating.id.into_uuid(),
            drill_id: rating.drill_id.into_uuid(),
            score: rating.score.value(),
            created_by_name: rating.created_by_name,
            created_at: rating.created_at,
        }
    }
}

/// Acknowledgement returned by deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
