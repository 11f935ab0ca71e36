//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use async_trait::async_trait;
use drill_catalog_application::{
    services::{
        CommentRepositoryPort, CommentService, DrillRepositoryPort, DrillService,
        HealthCheckPort, RatingRepositoryPort, RatingService,
    },
    validation::{CreateCommentRequest, CreateDrillRequest, CreateRatingRequest, UpdateDrillRequest},
    ApplicationError,
};
use drill_catalog_domain::{
    comment::Comment, drill::DrillSummary, filters::DrillFilters, rating::Rating,
};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Drill service (type-erased)
    pub drill_service: Arc<dyn DrillServiceTrait>,

    /// Comment service (type-erased)
    pub comment_service: Arc<dyn CommentServiceTrait>,

    /// Rating service (type-erased)
    pub rating_service: Arc<dyn RatingServiceTrait>,

    /// Storage liveness probe
    pub health: Arc<dyn HealthCheckPort>,
}

impl AppState {
    /// Wire every service against a single store that implements all ports
    pub fn new<S>(config: ApiConfig, store: Arc<S>) -> Self
    where
        S: DrillRepositoryPort
            + CommentRepositoryPort
            + RatingRepositoryPort
            + HealthCheckPort
            + 'static,
    {
        Self::with_services(
            config,
            DrillService::new(store.clone()),
            CommentService::new(store.clone(), store.clone()),
            RatingService::new(store.clone(), store.clone()),
            store,
        )
    }

    /// Create application state with custom service implementations
    pub fn with_services<D, C, R>(
        config: ApiConfig,
        drill_service: D,
        comment_service: C,
        rating_service: R,
        health: Arc<dyn HealthCheckPort>,
    ) -> Self
    where
        D: DrillServiceTrait + 'static,
        C: CommentServiceTrait + 'static,
        R: RatingServiceTrait + 'static,
    {
        Self {
            config: Arc::new(config),
            drill_service: Arc::new(drill_service),
            comment_service: Arc::new(comment_service),
            rating_service: Arc::new(rating_service),
            health,
        }
    }
}

// ============================================================================
// SERVICE TRAITS (Type-erased interfaces for route handlers)
// ============================================================================

/// Type-erased drill service trait
#[async_trait]
pub trait DrillServiceTrait: Send + Sync {
    async fn create(&self, request: CreateDrillRequest) -> Result<DrillSummary, ApplicationError>;

    async fn list(&self, filters: DrillFilters) -> Result<Vec<DrillSummary>, ApplicationError>;

    async fn get(&self, id: &str) -> Result<DrillSummary, ApplicationError>;

    async fn update(
        &self,
        id: &str,
        request: UpdateDrillRequest,
    ) -> Result<DrillSummary, ApplicationError>;

    async fn delete(&self, id: &str) -> Result<(), ApplicationError>;
}

/// Type-erased comment service trait
#[async_trait]
pub trait CommentServiceTrait: Send + Sync {
    async fn list(&self, drill_id: &str) -> Result<Vec<Comment>, ApplicationError>;

    async fn add(
        &self,
        drill_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment, ApplicationError>;

    async fn delete(&self, comment_id: &str) -> Result<(), ApplicationError>;
}

/// Type-erased rating service trait
#[async_trait]
pub trait RatingServiceTrait: Send + Sync {
    async fn list(&self, drill_id: &str) -> Result<Vec<Rating>, ApplicationError>;

    async fn add(
        &self,
        drill_id: &str,
        request: CreateRatingRequest,
    ) -> Result<Rating, ApplicationError>;

    async fn delete(&self, rating_id: &str) -> Result<(), ApplicationError>;
}

// ============================================================================
// TRAIT IMPLEMENTATIONS FOR CONCRETE SERVICES
// ============================================================================

#[async_trait]
impl<D> DrillServiceTrait for DrillService<D>
where
    D: DrillRepositoryPort + 'static,
{
    async fn create(&self, request: CreateDrillRequest) -> Result<DrillSummary, ApplicationError> {
        self.create_drill(request).await
    }

    async fn list(&self, filters: DrillFilters) -> Result<Vec<DrillSummary>, ApplicationError> {
        self.list_drills(filters).await
    }

    async fn get(&self, id: &str) -> Result<DrillSummary, ApplicationError> {
        self.get_drill(id).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateDrillRequest,
    ) -> Result<DrillSummary, ApplicationError> {
        self.update_drill(id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApplicationError> {
        self.delete_drill(id).await
    }
}

#[async_trait]
impl<C, D> CommentServiceTrait for CommentService<C, D>
where
    C: CommentRepositoryPort + 'static,
    D: DrillRepositoryPort + 'static,
{
    async fn list(&self, drill_id: &str) -> Result<Vec<Comment>, ApplicationError> {
        self.list_comments(drill_id).await
    }

    async fn add(
        &self,
        drill_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment, ApplicationError> {
        self.add_comment(drill_id, request).await
    }

    async fn delete(&self, comment_id: &str) -> Result<(), ApplicationError> {
        self.delete_comment(comment_id).await
    }
}

#[async_trait]
impl<R, D> RatingServiceTrait for RatingService<R, D>
where
    R: RatingRepositoryPort + 'static,
    D: DrillRepositoryPort + 'static,
{
    async fn list(&self, drill_id: &str) -> Result<Vec<Rating>, ApplicationError> {
        self.list_ratings(drill_id).await
    }

    async fn add(
        &self,
        drill_id: &str,
        request: CreateRatingRequest,
    ) -> Result<Rating, ApplicationError> {
        self.add_rating(drill_id, request).await
    }

    async fn delete(&self, rating_id: &str) -> Result<(), ApplicationError> {
        self.delete_rating(rating_id).await
    }
}
