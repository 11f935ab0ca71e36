//! Application builder.
//!
//! This module assembles all routes, middleware, and state into an Axum
//! router.

use crate::{
    error::ErrorResponse,
    middleware::{logging_middleware, request_id_middleware},
    responses::{CommentResponse, DrillResponse, OkResponse, RatingResponse},
    routes::{self, comments, drills, health, ratings},
    state::AppState,
};
use axum::{
    http::{header, Method},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the catalog
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drill Catalog API",
        version = "1.0.0",
        description = "Catalog of volleyball drill videos with comments and ratings",
        license(name = "MIT"),
    ),
    paths(
        health::health,
        drills::list_drills,
        drills::create_drill,
        drills::get_drill,
        drills::update_drill,
        drills::delete_drill,
        comments::list_comments,
        comments::add_comment,
        comments::delete_comment,
        ratings::list_ratings,
        ratings::add_rating,
        ratings::delete_rating,
    ),
    components(schemas(
        DrillResponse,
        CommentResponse,
        RatingResponse,
        OkResponse,
        ErrorResponse,
        health::HealthResponse,
        drills::CreateDrillApiRequest,
        drills::UpdateDrillApiRequest,
        comments::CreateCommentApiRequest,
        ratings::CreateRatingApiRequest,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "drills", description = "Drill catalog"),
        (name = "comments", description = "Comments on drills"),
        (name = "ratings", description = "Ratings of drills"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
///
/// Fails when a configured CORS origin is not a valid header value.
pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let config = state.config.clone();
    let cors = build_cors_layer(&config.cors_origins()?);

    let mut app = routes::routes().with_state(state);

    if config.enable_swagger {
        app = app.merge(swagger_ui());
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors)
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn(logging_middleware)),
    );

    Ok(app)
}

/// Build CORS layer from the allow-list
fn build_cors_layer(origins: &[http::HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins.to_vec())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// Swagger UI and the OpenAPI document
fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
