//! Error types for the drill catalog domain.
//!
//! Domain code only fails on malformed input. Storage and lookup failures are
//! modelled by the layers that perform them.

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, ValidationError>;

/// Validation errors raised while building domain values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A client-supplied identifier is not a UUID
    #[error("Invalid {kind} id")]
    InvalidIdentifier {
        /// Entity the identifier refers to
        kind: &'static str,
        /// Raw value as received
        value: String,
    },

    /// Field validation failed
    #[error("{field}: {message}")]
    FieldValidation {
        /// Offending field
        field: String,
        /// Human-readable reason
        message: String,
    },

    /// Invalid URL
    #[error("url: {0}")]
    InvalidUrl(String),

    /// Rating score outside the accepted range
    #[error("score: must be between {min} and {max}, got {value}")]
    ScoreOutOfRange {
        /// Rejected value
        value: i32,
        /// Lowest accepted score
        min: i32,
        /// Highest accepted score
        max: i32,
    },
}

impl ValidationError {
    /// Build a field-level error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error concerns an identifier rather than a payload
    pub fn is_malformed_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::InvalidIdentifier {
            kind: "comment",
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid comment id");
        assert!(err.is_malformed_identifier());

        let err = ValidationError::field("created_by_name", "too short");
        assert_eq!(err.to_string(), "created_by_name: too short");
        assert!(!err.is_malformed_identifier());

        let err = ValidationError::ScoreOutOfRange {
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "score: must be between 1 and 10, got 11");
    }
}
