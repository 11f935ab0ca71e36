//! Write requests and the checks they pass before reaching storage.
//!
//! Each request reports every problem it finds at once through
//! [`FieldErrors`], which becomes a single `ValidationFailed` error whose
//! message reads `field: reason; field: reason`, ordered by field name.

mod comment;
mod drill;
mod rating;

pub use comment::*;
pub use drill::*;
pub use rating::*;

use crate::{ApplicationError, ApplicationResult};
use drill_catalog_domain::drill::canonicalize_url;
use drill_catalog_domain::ValidationError;
use std::collections::BTreeMap;
use url::Url;

/// Longest accepted author name, in characters
pub const MAX_NAME_LENGTH: usize = 80;
/// Shortest accepted author name, in characters
pub const MIN_NAME_LENGTH: usize = 2;

/// Problems found in one request, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reasons recorded against `field`
    pub fn reasons(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check a length in characters, not bytes.
    pub fn check_length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let length = value.chars().count();
        if length < min {
            self.add(field, format!("Must be at least {} characters", min));
        } else if length > max {
            self.add(field, format!("Must be {} characters or less", max));
        }
    }

    /// Author names are measured after trimming.
    pub fn check_name(&mut self, name: &str) {
        self.check_length("created_by_name", name.trim(), MIN_NAME_LENGTH, MAX_NAME_LENGTH);
    }

    /// Check that `raw` is an absolute http(s) URL, returning it parsed.
    pub fn check_url(&mut self, raw: &str) -> Option<Url> {
        match canonicalize_url(raw) {
            Ok(url) => Some(url),
            Err(ValidationError::InvalidUrl(reason)) => {
                self.add("url", reason);
                None
            }
            Err(other) => {
                self.add("url", other.to_string());
                None
            }
        }
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> ApplicationResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let message = self
            .0
            .iter()
            .flat_map(|(field, reasons)| reasons.iter().map(move |r| format!("{}: {}", field, r)))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ApplicationError::ValidationFailed(message))
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = FieldErrors::new();
        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let reason = match &failure.message {
                    Some(message) => message.to_string(),
                    None => failure.code.to_string(),
                };
                collected.add(field.to_string(), reason);
            }
        }
        collected
    }
}

impl From<validator::ValidationErrors> for ApplicationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        match FieldErrors::from(errors).into_result() {
            Err(err) => err,
            Ok(()) => ApplicationError::ValidationFailed("Invalid request".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_length_counts_characters() {
        let mut errors = FieldErrors::new();
        errors.check_length("x", "ññ", 2, 2);
        assert!(errors.is_empty());

        errors.check_length("x", "a", 2, 80);
        assert_eq!(errors.reasons("x"), ["Must be at least 2 characters"]);
    }

    #[test]
    fn test_name_bounds() {
        for (name, ok) in [
            ("A", false),
            (" A ", false),
            ("Al", true),
            (&"a".repeat(80)[..], true),
            (&"a".repeat(81)[..], false),
        ] {
            let mut errors = FieldErrors::new();
            errors.check_name(name);
            assert_eq!(errors.is_empty(), ok, "{:?}", name);
        }
    }

    #[test]
    fn test_url_reason_has_no_field_prefix() {
        let mut errors = FieldErrors::new();
        let parsed = errors.check_url("https://youtube.com/watch?v=abc");
        assert_eq!(parsed.unwrap().as_str(), "https://youtube.com/watch?v=abc");
        assert!(errors.is_empty());

        assert!(errors.check_url("youtube").is_none());
        assert_eq!(errors.reasons("url").len(), 1);
        assert!(!errors.reasons("url")[0].starts_with("url:"));
    }

    #[test]
    fn test_message_is_ordered_by_field() {
        let mut errors = FieldErrors::new();
        errors.add("url", "bad");
        errors.add("created_by_name", "short");

        assert_eq!(
            errors.into_result().unwrap_err(),
            ApplicationError::ValidationFailed("created_by_name: short; url: bad".to_string())
        );
    }

    #[derive(Validate)]
    struct Wire {
        #[validate(length(min = 2, message = "Too short"))]
        name: String,
        #[validate(range(min = 1))]
        score: i32,
    }

    #[test]
    fn test_validator_errors_convert() {
        let wire = Wire {
            name: "a".to_string(),
            score: 0,
        };
        let err: ApplicationError = wire.validate().unwrap_err().into();
        assert_eq!(
            err,
            ApplicationError::ValidationFailed("name: Too short; score: range".to_string())
        );
    }
}
