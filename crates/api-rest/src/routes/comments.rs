//! Comment endpoints.

use crate::{
    error::ApiResult,
    extractors::ValidatedJson,
    responses::{CommentResponse, OkResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use drill_catalog_application::validation::CreateCommentRequest;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Create comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentApiRequest {
    #[schema(example = "Great for warming up the passers")]
    #[validate(length(min = 1, max = 2000, message = "Must be between 1 and 2000 characters"))]
    pub comment: String,

    #[schema(example = "Alice")]
    #[validate(length(min = 2, max = 80, message = "Must be between 2 and 80 characters"))]
    pub created_by_name: String,
}

impl From<CreateCommentApiRequest> for CreateCommentRequest {
    fn from(req: CreateCommentApiRequest) -> Self {
        Self {
            comment: req.comment,
            created_by_name: req.created_by_name,
        }
    }
}

/// Comment routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drills/:id/comments", get(list_comments).post(add_comment))
        .route("/comments/:id", delete(delete_comment))
        .route("/drills/comments/:id", delete(delete_comment))
}

/// List comments of a drill, newest first
#[utoipa::path(
    get,
    path = "/drills/{id}/comments",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    responses(
        (status = 200, description = "Comments", body = Vec<CommentResponse>),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(drill_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state.comment_service.list(&drill_id).await?;

    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// Add a comment to a drill
#[utoipa::path(
    post,
    path = "/drills/{id}/comments",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    request_body = CreateCommentApiRequest,
    responses(
        (status = 200, description = "Comment added", body = CommentResponse),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid payload", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(drill_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateCommentApiRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state.comment_service.add(&drill_id, req.into()).await?;

    Ok(Json(comment.into()))
}

/// Delete a comment
///
/// Also served at `/drills/comments/{id}`.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    params(
        ("id" = String, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, description = "Comment deleted", body = OkResponse),
        (status = 400, description = "Malformed comment ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Comment not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    state.comment_service.delete(&comment_id).await?;

    Ok(Json(OkResponse::ok()))
}
