//! Rating endpoints.

use crate::{
    error::ApiResult,
    extractors::ValidatedJson,
    responses::{OkResponse, RatingResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use drill_catalog_application::validation::CreateRatingRequest;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Create rating request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingApiRequest {
    /// Whole number from 1 to 10
    #[schema(example = 8, minimum = 1, maximum = 10)]
    #[validate(range(min = 1, max = 10, message = "Must be between 1 and 10"))]
    pub score: i32,

    #[schema(example = "Alice")]
    #[validate(length(min = 2, max = 80, message = "Must be between 2 and 80 characters"))]
    pub created_by_name: String,
}

impl From<CreateRatingApiRequest> for CreateRatingRequest {
    fn from(req: CreateRatingApiRequest) -> Self {
        Self {
            score: req.score,
            created_by_name: req.created_by_name,
        }
    }
}

/// Rating routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drills/:id/ratings", get(list_ratings).post(add_rating))
        .route("/ratings/:id", delete(delete_rating))
        .route("/drills/ratings/:id", delete(delete_rating))
}

/// List ratings of a drill, newest first
#[utoipa::path(
    get,
    path = "/drills/{id}/ratings",
    tag = "ratings",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    responses(
        (status = 200, description = "Ratings", body = Vec<RatingResponse>),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_ratings(
    State(state): State<AppState>,
    Path(drill_id): Path<String>,
) -> ApiResult<Json<Vec<RatingResponse>>> {
    let ratings = state.rating_service.list(&drill_id).await?;

    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}

/// Rate a drill
#[utoipa::path(
    post,
    path = "/drills/{id}/ratings",
    tag = "ratings",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    request_body = CreateRatingApiRequest,
    responses(
        (status = 200, description = "Rating added", body = RatingResponse),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid payload", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_rating(
    State(state): State<AppState>,
    Path(drill_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateRatingApiRequest>,
) -> ApiResult<Json<RatingResponse>> {
    let rating = state.rating_service.add(&drill_id, req.into()).await?;

    Ok(Json(rating.into()))
}

/// Delete a rating
///
/// Also served at `/drills/ratings/{id}`.
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    tag = "ratings",
    params(
        ("id" = String, Path, description = "Rating ID"),
    ),
    responses(
        (status = 200, description = "Rating deleted", body = OkResponse),
        (status = 400, description = "Malformed rating ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Rating not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(rating_id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    state.rating_service.delete(&rating_id).await?;

    Ok(Json(OkResponse::ok()))
}
