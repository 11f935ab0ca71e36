//! Fluent builder pattern for constructing test data.
//!
//! Builders start from a valid request and let a test change only the
//! fields it cares about.

use crate::fixtures::{fake_author, TEST_VIDEO_URL};
use drill_catalog_application::validation::{
    CreateCommentRequest, CreateDrillRequest, CreateRatingRequest,
};

/// Builder for drill creation requests
#[derive(Clone)]
pub struct CreateDrillRequestBuilder {
    request: CreateDrillRequest,
}

impl CreateDrillRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: CreateDrillRequest {
                url: TEST_VIDEO_URL.to_string(),
                created_by_name: fake_author(),
                ..Default::default()
            },
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.request.url = url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.request.title = Some(title.into());
        self
    }

    pub fn with_levels(mut self, levels: Vec<i32>) -> Self {
        self.request.levels = levels;
        self
    }

    pub fn with_fundamentals(mut self, fundamentals: &[&str]) -> Self {
        self.request.fundamentals = fundamentals.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_drill_types(mut self, drill_types: &[&str]) -> Self {
        self.request.drill_types = drill_types.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn coach_participates(mut self, value: bool) -> Self {
        self.request.coach_participates = Some(value);
        self
    }

    pub fn good_for_many_players(mut self, value: bool) -> Self {
        self.request.good_for_many_players = Some(value);
        self
    }

    pub fn with_players(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.request.min_players = min;
        self.request.max_players = max;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.request.notes = Some(notes.into());
        self
    }

    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.request.created_by_name = name.into();
        self
    }

    pub fn build(self) -> CreateDrillRequest {
        self.request
    }
}

impl Default for CreateDrillRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Valid comment request with the given text
pub fn comment_request(text: impl Into<String>) -> CreateCommentRequest {
    CreateCommentRequest {
        comment: text.into(),
        created_by_name: fake_author(),
    }
}

/// Rating request with the given score, valid or not
pub fn rating_request(score: i32) -> CreateRatingRequest {
    CreateRatingRequest {
        score,
        created_by_name: fake_author(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_builder() {
        let request = CreateDrillRequestBuilder::new()
            .with_title("Pepper")
            .with_levels(vec![3])
            .with_fundamentals(&["serve", "block"])
            .coach_participates(true)
            .build();

        assert_eq!(request.title.as_deref(), Some("Pepper"));
        assert_eq!(request.levels, vec![3]);
        assert_eq!(request.fundamentals.len(), 2);
        assert_eq!(request.coach_participates, Some(true));
        assert!(request.into_new_drill().is_ok());
    }
}
