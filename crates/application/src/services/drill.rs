//! Drill Service
//!
//! Business logic for drill management: creation, filtered listings with
//! aggregates, partial updates and cascading deletes.

use super::require_drill;
use crate::validation::{CreateDrillRequest, UpdateDrillRequest};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use drill_catalog_domain::drill::{Drill, DrillSummary, NewDrill};
use drill_catalog_domain::filters::DrillFilters;
use drill_catalog_domain::identifiers::DrillId;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Drill repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait DrillRepositoryPort: Send + Sync {
    /// Store a new drill; identity and timestamp are assigned by the store
    async fn create(&self, drill: &NewDrill) -> ApplicationResult<Drill>;

    /// Load a drill without aggregates
    async fn get(&self, id: DrillId) -> ApplicationResult<Option<Drill>>;

    /// Load a drill with its comment and rating aggregates
    async fn get_with_aggregates(&self, id: DrillId) -> ApplicationResult<Option<DrillSummary>>;

    /// List drills matching `filters`, in listing order
    async fn list(&self, filters: &DrillFilters) -> ApplicationResult<Vec<DrillSummary>>;

    /// Persist field changes of an existing drill
    async fn update(&self, drill: &Drill) -> ApplicationResult<Drill>;

    /// Remove a drill with its comments and ratings; `false` if it was absent
    async fn delete(&self, id: DrillId) -> ApplicationResult<bool>;
}

/// Drill service implementation
pub struct DrillService<D>
where
    D: DrillRepositoryPort,
{
    drills: Arc<D>,
}

impl<D> DrillService<D>
where
    D: DrillRepositoryPort,
{
    pub fn new(drills: Arc<D>) -> Self {
        Self { drills }
    }

    /// Create a new drill
    #[instrument(skip(self, request))]
    pub async fn create_drill(&self, request: CreateDrillRequest) -> ApplicationResult<DrillSummary> {
        let new_drill = request.into_new_drill()?;
        let drill = self.drills.create(&new_drill).await?;

        info!(drill_id = %drill.id, platform = %drill.platform, "Drill created");

        Ok(DrillSummary::fresh(drill))
    }

    /// List drills with aggregates
    #[instrument(skip(self))]
    pub async fn list_drills(&self, filters: DrillFilters) -> ApplicationResult<Vec<DrillSummary>> {
        let drills = self.drills.list(&filters).await?;
        debug!(count = drills.len(), "Listed drills");
        Ok(drills)
    }

    /// Get a drill with aggregates
    #[instrument(skip(self))]
    pub async fn get_drill(&self, id: &str) -> ApplicationResult<DrillSummary> {
        let drill_id = DrillId::parse(id)?;

        self.drills
            .get_with_aggregates(drill_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(DrillId::KIND))
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update_drill(
        &self,
        id: &str,
        request: UpdateDrillRequest,
    ) -> ApplicationResult<DrillSummary> {
        // A bad body is reported ahead of a bad or unknown id.
        request.validate()?;
        let drill_id = DrillId::parse(id)?;

        let mut drill = self
            .drills
            .get(drill_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(DrillId::KIND))?;

        if !request.is_empty() {
            request.apply_to(&mut drill)?;
            self.drills.update(&drill).await?;
            info!(drill_id = %drill_id, "Drill updated");
        }

        // Aggregates may have moved since the drill was loaded.
        self.drills
            .get_with_aggregates(drill_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(DrillId::KIND))
    }

    /// Delete a drill together with its comments and ratings
    #[instrument(skip(self))]
    pub async fn delete_drill(&self, id: &str) -> ApplicationResult<()> {
        let drill_id = require_drill(self.drills.as_ref(), id).await?;

        if !self.drills.delete(drill_id).await? {
            return Err(ApplicationError::not_found(DrillId::KIND));
        }

        info!(drill_id = %drill_id, "Drill deleted");
        Ok(())
    }
}
