//! Storage health probe

use crate::ApplicationResult;
use async_trait::async_trait;

/// Liveness check against the backing store (to be implemented by infrastructure)
#[async_trait]
pub trait HealthCheckPort: Send + Sync {
    /// Round-trip to storage; `Err` when it cannot be reached
    async fn ping(&self) -> ApplicationResult<()>;
}
