//! Application layer for the drill catalog
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Architecture
//!
//! Services own the use cases and talk to storage through repository ports
//! (`*RepositoryPort` traits) that the infrastructure crate implements.
//!
//! ## Modules
//!
//! - `services` - Drill, comment and rating use cases plus the health probe
//! - `validation` - Request types and their validation rules
//! - `patch` - Three-state values for partial updates

pub mod patch;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use patch::Patch;
pub use services::{
    CommentRepositoryPort, CommentService, DrillRepositoryPort, DrillService, HealthCheckPort,
    RatingRepositoryPort, RatingService,
};
pub use validation::FieldErrors;

use drill_catalog_domain::ValidationError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Malformed input, such as an unparseable identifier
    #[error("{0}")]
    InvalidInput(String),

    /// Payload failed field validation
    #[error("{0}")]
    ValidationFailed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Storage unreachable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Not-found error for an entity kind, e.g. "Drill not found"
    pub fn not_found(kind: &str) -> Self {
        let mut chars = kind.chars();
        let title = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        ApplicationError::NotFound(format!("{} not found", title))
    }
}

impl From<ValidationError> for ApplicationError {
    fn from(err: ValidationError) -> Self {
        if err.is_malformed_identifier() {
            ApplicationError::InvalidInput(err.to_string())
        } else {
            ApplicationError::ValidationFailed(err.to_string())
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_http_status() {
        assert_eq!(ApplicationError::NotFound("test".to_string()).http_status(), 404);
        assert_eq!(ApplicationError::InvalidInput("test".to_string()).http_status(), 400);
        assert_eq!(ApplicationError::ValidationFailed("test".to_string()).http_status(), 422);
        assert_eq!(ApplicationError::Internal("test".to_string()).http_status(), 500);
        assert_eq!(ApplicationError::ServiceUnavailable("test".to_string()).http_status(), 503);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ApplicationError::not_found("drill"),
            ApplicationError::NotFound("Drill not found".to_string())
        );
        assert_eq!(ApplicationError::not_found("rating").to_string(), "Rating not found");
    }

    #[test]
    fn test_from_validation_error() {
        let err: ApplicationError = ValidationError::InvalidIdentifier {
            kind: "comment",
            value: "nope".to_string(),
        }
        .into();
        assert_eq!(err, ApplicationError::InvalidInput("Invalid comment id".to_string()));

        let err: ApplicationError = ValidationError::InvalidUrl("bad".to_string()).into();
        assert_eq!(err.http_status(), 422);
    }
}
