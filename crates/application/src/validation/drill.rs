//! Drill create and update requests

use super::FieldErrors;
use crate::{ApplicationResult, Patch};
use drill_catalog_domain::drill::{canonicalize_url, normalize_levels, normalize_tags, Drill, NewDrill};

/// Create drill request validation
#[derive(Debug, Clone, Default)]
pub struct CreateDrillRequest {
    pub url: String,
    pub title: Option<String>,
    pub levels: Vec<i32>,
    pub fundamentals: Vec<String>,
    pub drill_types: Vec<String>,
    pub coach_participates: Option<bool>,
    pub good_for_many_players: Option<bool>,
    pub min_players: Option<i32>,
    pub max_players: Option<i32>,
    pub notes: Option<String>,
    pub created_by_name: String,
}

impl CreateDrillRequest {
    /// Only the url and the author name are constrained.
    pub fn validate(&self) -> ApplicationResult<()> {
        let mut errors = FieldErrors::new();
        errors.check_url(&self.url);
        errors.check_name(&self.created_by_name);
        errors.into_result()
    }

    /// Validate the request and turn it into a drill ready to be stored
    pub fn into_new_drill(self) -> ApplicationResult<NewDrill> {
        self.validate()?;

        let url = canonicalize_url(&self.url)?;
        let mut drill = NewDrill::new(&url, self.created_by_name.trim());
        drill.title = self.title.and_then(clean_text);
        drill.levels = normalize_levels(self.levels);
        drill.fundamentals = normalize_tags(self.fundamentals);
        drill.drill_types = normalize_tags(self.drill_types);
        drill.coach_participates = self.coach_participates;
        drill.good_for_many_players = self.good_for_many_players;
        drill.min_players = self.min_players;
        drill.max_players = self.max_players;
        drill.notes = self.notes.and_then(clean_text);

        Ok(drill)
    }
}

/// Partial drill update. Only keys present in the request are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateDrillRequest {
    pub title: Patch<String>,
    pub url: Patch<String>,
    pub levels: Patch<Vec<i32>>,
    pub fundamentals: Patch<Vec<String>>,
    pub drill_types: Patch<Vec<String>>,
    pub coach_participates: Patch<bool>,
    pub good_for_many_players: Patch<bool>,
    pub min_players: Patch<i32>,
    pub max_players: Patch<i32>,
    pub notes: Patch<String>,
}

impl UpdateDrillRequest {
    /// Whether the request carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.title.is_absent()
            && self.url.is_absent()
            && self.levels.is_absent()
            && self.fundamentals.is_absent()
            && self.drill_types.is_absent()
            && self.coach_participates.is_absent()
            && self.good_for_many_players.is_absent()
            && self.min_players.is_absent()
            && self.max_players.is_absent()
            && self.notes.is_absent()
    }

    /// Reject nulls on fields a drill cannot lack, and malformed urls.
    pub fn validate(&self) -> ApplicationResult<()> {
        let mut errors = FieldErrors::new();
        for (field, is_null) in [
            ("url", self.url.is_null()),
            ("levels", self.levels.is_null()),
            ("fundamentals", self.fundamentals.is_null()),
            ("drill_types", self.drill_types.is_null()),
        ] {
            if is_null {
                errors.add(field, "Cannot be null");
            }
        }
        if let Some(url) = self.url.as_value() {
            errors.check_url(url);
        }
        errors.into_result()
    }

    /// Validate the request and apply it to `drill`.
    pub fn apply_to(self, drill: &mut Drill) -> ApplicationResult<()> {
        self.validate()?;

        if let Patch::Value(raw) = &self.url {
            drill.set_url(&canonicalize_url(raw)?);
        }
        if let Patch::Value(levels) = self.levels {
            drill.levels = normalize_levels(levels);
        }
        if let Patch::Value(fundamentals) = self.fundamentals {
            drill.fundamentals = normalize_tags(fundamentals);
        }
        if let Patch::Value(drill_types) = self.drill_types {
            drill.drill_types = normalize_tags(drill_types);
        }

        clean_patch(self.title).apply_to(&mut drill.title);
        clean_patch(self.notes).apply_to(&mut drill.notes);
        self.coach_participates.apply_to(&mut drill.coach_participates);
        self.good_for_many_players
            .apply_to(&mut drill.good_for_many_players);
        self.min_players.apply_to(&mut drill.min_players);
        self.max_players.apply_to(&mut drill.max_players);

        Ok(())
    }
}

/// Trim free text; blank text is stored as null
fn clean_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Value(value) => Patch::from(clean_text(value)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use chrono::Utc;
    use drill_catalog_domain::drill::Platform;
    use drill_catalog_domain::identifiers::DrillId;

    fn create_request() -> CreateDrillRequest {
        CreateDrillRequest {
            url: "https://youtube.com/watch?v=abc".to_string(),
            created_by_name: "Alice".to_string(),
            ..Default::default()
        }
    }

    fn stored_drill() -> Drill {
        create_request()
            .into_new_drill()
            .unwrap()
            .into_drill(DrillId::new(), Utc::now())
    }

    #[test]
    fn test_create_valid_request() {
        let drill = create_request().into_new_drill().unwrap();
        assert_eq!(drill.url, "https://youtube.com/watch?v=abc");
        assert_eq!(drill.platform, Platform::Youtube);
        assert_eq!(drill.video_id.as_deref(), Some("abc"));
        assert!(drill.levels.is_empty());
        assert_eq!(drill.title, None);
    }

    #[test]
    fn test_create_rejects_bad_url_and_name() {
        let request = CreateDrillRequest {
            url: "not a url".to_string(),
            created_by_name: "A".to_string(),
            ..Default::default()
        };
        let err = request.into_new_drill().unwrap_err();
        match err {
            ApplicationError::ValidationFailed(message) => {
                assert!(message.contains("url:"));
                assert!(message.contains("created_by_name:"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_normalizes_tags_and_text() {
        let request = CreateDrillRequest {
            levels: vec![2, 1, 2],
            fundamentals: vec![" serve ".to_string(), "".to_string(), "serve".to_string()],
            notes: Some("   ".to_string()),
            title: Some(" Pepper ".to_string()),
            ..create_request()
        };
        let drill = request.into_new_drill().unwrap();
        assert_eq!(drill.levels, vec![2, 1]);
        assert_eq!(drill.fundamentals, vec!["serve".to_string()]);
        assert_eq!(drill.notes, None);
        assert_eq!(drill.title.as_deref(), Some("Pepper"));
    }

    #[test]
    fn test_update_applies_only_present_keys() {
        let mut drill = stored_drill();
        drill.notes = Some("keep me".to_string());
        drill.coach_participates = Some(true);

        let update = UpdateDrillRequest {
            coach_participates: Patch::Null,
            levels: Patch::Value(vec![3]),
            ..Default::default()
        };
        update.apply_to(&mut drill).unwrap();

        assert_eq!(drill.coach_participates, None);
        assert_eq!(drill.levels, vec![3]);
        assert_eq!(drill.notes.as_deref(), Some("keep me"));
    }

    #[test]
    fn test_update_url_rederives_platform() {
        let mut drill = stored_drill();
        let update = UpdateDrillRequest {
            url: Patch::Value("https://vimeo.com/42".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut drill).unwrap();
        assert_eq!(drill.platform, Platform::Vimeo);
        assert_eq!(drill.video_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        let mut drill = stored_drill();
        let update = UpdateDrillRequest {
            url: Patch::Null,
            ..Default::default()
        };
        assert_eq!(
            update.apply_to(&mut drill).unwrap_err(),
            ApplicationError::ValidationFailed("url: Cannot be null".to_string())
        );
    }

    #[test]
    fn test_free_form_fields_are_unconstrained() {
        let request = CreateDrillRequest {
            title: Some("t".repeat(500)),
            notes: Some("n".repeat(10_000)),
            levels: (-3..30).collect(),
            fundamentals: (0..21).map(|i| format!("fundamental-{}", i)).collect(),
            drill_types: vec!["x".repeat(51)],
            min_players: Some(6),
            max_players: Some(2),
            ..create_request()
        };
        let drill = request.into_new_drill().unwrap();
        assert_eq!(drill.fundamentals.len(), 21);
        assert_eq!(drill.levels.len(), 33);
        assert_eq!((drill.min_players, drill.max_players), (Some(6), Some(2)));

        let mut stored = stored_drill();
        stored.max_players = Some(4);
        let update = UpdateDrillRequest {
            min_players: Patch::Value(-1),
            drill_types: Patch::Value(vec!["y".repeat(51)]),
            ..Default::default()
        };
        update.apply_to(&mut stored).unwrap();
        assert_eq!(stored.min_players, Some(-1));
    }
}
