//! Infrastructure layer for the drill catalog
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - Schema bootstrap
//! - Repository port implementations for drills, comments and ratings
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drill_catalog_infrastructure::{
//!     database::{DatabaseConfig, DatabasePool},
//!     repositories::PgDrillRepository,
//!     schema,
//! };
//!
//! let pool = DatabasePool::new(&DatabaseConfig::from_settings(&config.database)).await?;
//! schema::ensure_schema(pool.pool()).await?;
//!
//! let drills = PgDrillRepository::new(pool.pool().clone());
//! ```

pub mod database;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use database::{DatabaseConfig, DatabasePool};
pub use repositories::{PgCommentRepository, PgDrillRepository, PgRatingRepository};

use drill_catalog_application::ApplicationError;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found errors
    #[error("{0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(message) => ApplicationError::NotFound(message),
            other => {
                error!(error = %other, "Storage operation failed");
                ApplicationError::Internal(other.to_string())
            }
        }
    }
}
