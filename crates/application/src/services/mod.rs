//! Application Services
//!
//! Business logic orchestration layer that resolves identifiers, checks that
//! referenced drills exist and coordinates repository access.

mod comment;
mod drill;
mod health;
mod rating;

pub use comment::*;
pub use drill::*;
pub use health::*;
pub use rating::*;

use crate::{ApplicationError, ApplicationResult};
use drill_catalog_domain::identifiers::DrillId;
use tracing::debug;

/// Parse a drill id and make sure the drill exists.
///
/// A malformed id is reported before any storage access.
pub(crate) async fn require_drill<D>(drills: &D, raw_id: &str) -> ApplicationResult<DrillId>
where
    D: DrillRepositoryPort + ?Sized,
{
    let drill_id = DrillId::parse(raw_id)?;

    if drills.get(drill_id).await?.is_none() {
        debug!(drill_id = %drill_id, "Drill not found");
        return Err(ApplicationError::not_found(DrillId::KIND));
    }

    Ok(drill_id)
}
