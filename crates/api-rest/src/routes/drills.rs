//! Drill endpoints.

use crate::{
    error::ApiResult,
    extractors::{JsonBody, ValidatedJson},
    responses::{DrillResponse, OkResponse},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use drill_catalog_application::{
    validation::{CreateDrillRequest, UpdateDrillRequest},
    FieldErrors, Patch,
};
use drill_catalog_domain::filters::{parse_flag, DrillFilters};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Create drill request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDrillApiRequest {
    /// Video link; platform and video id are derived from it
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: String,

    pub title: Option<String>,

    #[serde(default)]
    pub levels: Option<Vec<i32>>,

    #[serde(default)]
    pub fundamentals: Option<Vec<String>>,

    #[serde(default)]
    pub drill_types: Option<Vec<String>>,

    pub coach_participates: Option<bool>,

    pub good_for_many_players: Option<bool>,

    pub min_players: Option<i32>,

    pub max_players: Option<i32>,

    pub notes: Option<String>,

    #[schema(example = "Alice")]
    #[validate(length(min = 2, max = 80, message = "Must be between 2 and 80 characters"))]
    pub created_by_name: String,
}

impl From<CreateDrillApiRequest> for CreateDrillRequest {
    fn from(req: CreateDrillApiRequest) -> Self {
        Self {
            url: req.url,
            title: req.title,
            levels: req.levels.unwrap_or_default(),
            fundamentals: req.fundamentals.unwrap_or_default(),
            drill_types: req.drill_types.unwrap_or_default(),
            coach_participates: req.coach_participates,
            good_for_many_players: req.good_for_many_players,
            min_players: req.min_players,
            max_players: req.max_players,
            notes: req.notes,
            created_by_name: req.created_by_name,
        }
    }
}

/// Partial drill update; keys left out are not touched, `null` clears a field
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDrillApiRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub url: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<Vec<i32>>)]
    pub levels: Patch<Vec<i32>>,

    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub fundamentals: Patch<Vec<String>>,

    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub drill_types: Patch<Vec<String>>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub coach_participates: Patch<bool>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub good_for_many_players: Patch<bool>,

    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub min_players: Patch<i32>,

    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub max_players: Patch<i32>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub notes: Patch<String>,
}

impl From<UpdateDrillApiRequest> for UpdateDrillRequest {
    fn from(req: UpdateDrillApiRequest) -> Self {
        Self {
            title: req.title,
            url: req.url,
            levels: req.levels,
            fundamentals: req.fundamentals,
            drill_types: req.drill_types,
            coach_participates: req.coach_participates,
            good_for_many_players: req.good_for_many_players,
            min_players: req.min_players,
            max_players: req.max_players,
            notes: req.notes,
        }
    }
}

/// Query parameters for listing drills
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DrillListQuery {
    /// Comma-separated levels, e.g. `1,2`
    pub levels: Option<String>,
    /// Comma-separated fundamentals
    pub fundamentals: Option<String>,
    /// Comma-separated drill types
    pub drill_types: Option<String>,
    /// Substring of title or url, case-insensitive
    pub q: Option<String>,
    /// Boolean such as `true`, `false`, `1`, `0`, `yes` or `off`; true keeps
    /// drills where the coach participates
    pub coach: Option<String>,
    /// Boolean, as for `coach`; true keeps drills good for many players
    pub many: Option<String>,
}

impl DrillListQuery {
    /// Boolean flags must parse; the list and search filters are forgiving.
    fn to_filters(&self) -> ApiResult<DrillFilters> {
        let mut errors = FieldErrors::new();
        for (field, raw) in [("coach", &self.coach), ("many", &self.many)] {
            if raw.as_deref().is_some_and(|value| parse_flag(value).is_none()) {
                errors.add(field, "Must be a boolean");
            }
        }
        errors.into_result()?;

        Ok(DrillFilters::from_query(
            self.levels.as_deref(),
            self.fundamentals.as_deref(),
            self.drill_types.as_deref(),
            self.q.as_deref(),
            self.coach.as_deref(),
            self.many.as_deref(),
        ))
    }
}

/// Drill routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drills", get(list_drills).post(create_drill))
        .route(
            "/drills/:id",
            get(get_drill).put(update_drill).delete(delete_drill),
        )
}

/// List drills
///
/// Returns every drill matching the filters with comment and rating
/// aggregates, rated drills first.
#[utoipa::path(
    get,
    path = "/drills",
    tag = "drills",
    params(DrillListQuery),
    responses(
        (status = 200, description = "Matching drills", body = Vec<DrillResponse>),
        (status = 422, description = "Unparseable coach or many flag", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_drills(
    State(state): State<AppState>,
    Query(query): Query<DrillListQuery>,
) -> ApiResult<Json<Vec<DrillResponse>>> {
    let drills = state.drill_service.list(query.to_filters()?).await?;

    Ok(Json(drills.into_iter().map(Into::into).collect()))
}

/// Create drill
#[utoipa::path(
    post,
    path = "/drills",
    tag = "drills",
    request_body = CreateDrillApiRequest,
    responses(
        (status = 200, description = "Drill created", body = DrillResponse),
        (status = 422, description = "Invalid payload", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_drill(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateDrillApiRequest>,
) -> ApiResult<Json<DrillResponse>> {
    let drill = state.drill_service.create(req.into()).await?;

    Ok(Json(drill.into()))
}

/// Get drill by ID
#[utoipa::path(
    get,
    path = "/drills/{id}",
    tag = "drills",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    responses(
        (status = 200, description = "Drill with aggregates", body = DrillResponse),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_drill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DrillResponse>> {
    let drill = state.drill_service.get(&id).await?;

    Ok(Json(drill.into()))
}

/// Update drill
///
/// Applies only the keys present in the body. Changing `url` re-derives the
/// platform and video id.
#[utoipa::path(
    put,
    path = "/drills/{id}",
    tag = "drills",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    request_body = UpdateDrillApiRequest,
    responses(
        (status = 200, description = "Updated drill", body = DrillResponse),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid payload", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_drill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateDrillApiRequest>,
) -> ApiResult<Json<DrillResponse>> {
    let drill = state.drill_service.update(&id, req.into()).await?;

    Ok(Json(drill.into()))
}

/// Delete drill
///
/// Comments and ratings of the drill are removed with it.
#[utoipa::path(
    delete,
    path = "/drills/{id}",
    tag = "drills",
    params(
        ("id" = String, Path, description = "Drill ID"),
    ),
    responses(
        (status = 200, description = "Drill deleted", body = OkResponse),
        (status = 400, description = "Malformed drill ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Drill not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_drill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OkResponse>> {
    state.drill_service.delete(&id).await?;

    Ok(Json(OkResponse::ok()))
}
