//! Listing filters.
//!
//! Filters arrive as loose query-string values. Parsing is forgiving: bad
//! tokens are dropped, and a filter left with no usable tokens is simply not
//! applied.

use crate::drill::Drill;
use serde::{Deserialize, Serialize};

/// Parsed filters for drill listings. Every predicate is optional and they
/// combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillFilters {
    /// Keep drills sharing at least one level
    pub levels: Vec<i32>,
    /// Keep drills sharing at least one fundamental
    pub fundamentals: Vec<String>,
    /// Keep drills sharing at least one drill type
    pub drill_types: Vec<String>,
    /// Case-insensitive substring of title or url
    pub search: Option<String>,
    /// Keep only drills where the coach participates
    pub coach_participates: bool,
    /// Keep only drills suited to many players
    pub good_for_many_players: bool,
}

impl DrillFilters {
    /// Build filters from raw query-string values
    pub fn from_query(
        levels: Option<&str>,
        fundamentals: Option<&str>,
        drill_types: Option<&str>,
        q: Option<&str>,
        coach: Option<&str>,
        many: Option<&str>,
    ) -> Self {
        Self {
            levels: levels.map(parse_level_list).unwrap_or_default(),
            fundamentals: fundamentals.map(parse_tag_list).unwrap_or_default(),
            drill_types: drill_types.map(parse_tag_list).unwrap_or_default(),
            search: q.and_then(parse_search),
            coach_participates: coach.and_then(parse_flag).unwrap_or(false),
            good_for_many_players: many.and_then(parse_flag).unwrap_or(false),
        }
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
            && self.fundamentals.is_empty()
            && self.drill_types.is_empty()
            && self.search.is_none()
            && !self.coach_participates
            && !self.good_for_many_players
    }

    /// Evaluate the filters against a drill in memory
    pub fn matches(&self, drill: &Drill) -> bool {
        if !self.levels.is_empty() && !overlaps(&self.levels, &drill.levels) {
            return false;
        }
        if !self.fundamentals.is_empty() && !overlaps(&self.fundamentals, &drill.fundamentals) {
            return false;
        }
        if !self.drill_types.is_empty() && !overlaps(&self.drill_types, &drill.drill_types) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let in_title = drill
                .title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&needle));
            if !in_title && !drill.url.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if self.coach_participates && drill.coach_participates != Some(true) {
            return false;
        }
        if self.good_for_many_players && drill.good_for_many_players != Some(true) {
            return false;
        }
        true
    }
}

fn overlaps<T: PartialEq>(wanted: &[T], present: &[T]) -> bool {
    wanted.iter().any(|w| present.contains(w))
}

/// Split a comma-separated list, trimming tokens and dropping empty ones.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a comma-separated list of levels, keeping only tokens made of
/// decimal digits that fit an `i32`.
pub fn parse_level_list(raw: &str) -> Vec<i32> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// Interpret a boolean query flag. Unrecognised values yield `None`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Normalize a free-text search term; blank input means no search.
pub fn parse_search(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::{canonicalize_url, NewDrill};
    use crate::identifiers::DrillId;
    use chrono::Utc;

    fn drill(levels: Vec<i32>, fundamentals: &[&str]) -> Drill {
        let url = canonicalize_url("https://youtube.com/watch?v=abc").unwrap();
        let mut new_drill = NewDrill::new(&url, "Alice");
        new_drill.levels = levels;
        new_drill.fundamentals = fundamentals.iter().map(|s| s.to_string()).collect();
        new_drill.into_drill(DrillId::new(), Utc::now())
    }

    #[test]
    fn test_parse_level_list() {
        assert_eq!(parse_level_list("1,2"), vec![1, 2]);
        assert_eq!(parse_level_list(" 3 , x, -1, 4.5,, 5"), vec![3, 5]);
        assert!(parse_level_list(",,").is_empty());
        assert!(parse_level_list("99999999999").is_empty());
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(
            parse_tag_list(" serve, ,receive ,"),
            vec!["serve".to_string(), "receive".to_string()]
        );
        assert!(parse_tag_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("YES"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("n"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_empty_tokens_mean_no_filter() {
        let filters = DrillFilters::from_query(Some("x,,"), Some(" , "), None, Some("  "), None, None);
        assert!(filters.is_empty());
        assert!(filters.matches(&drill(vec![], &[])));
    }

    #[test]
    fn test_level_overlap_semantics() {
        let filters = DrillFilters::from_query(Some("1,2"), None, None, None, None, None);
        assert!(filters.matches(&drill(vec![1], &[])));
        assert!(filters.matches(&drill(vec![2, 5], &[])));
        assert!(!filters.matches(&drill(vec![3], &[])));
        assert!(!filters.matches(&drill(vec![], &[])));
    }

    #[test]
    fn test_flags_exclude_null_and_false() {
        let filters = DrillFilters::from_query(None, None, None, None, Some("true"), None);
        let mut d = drill(vec![], &[]);
        assert!(!filters.matches(&d));
        d.coach_participates = Some(false);
        assert!(!filters.matches(&d));
        d.coach_participates = Some(true);
        assert!(filters.matches(&d));

        let off = DrillFilters::from_query(None, None, None, None, Some("false"), None);
        assert!(off.is_empty());
    }

    #[test]
    fn test_search_matches_title_or_url() {
        let filters = DrillFilters::from_query(None, None, None, Some("YouTube"), None, None);
        assert!(filters.matches(&drill(vec![], &[])));

        let filters = DrillFilters::from_query(None, None, None, Some("pepper"), None, None);
        let mut d = drill(vec![], &[]);
        assert!(!filters.matches(&d));
        d.title = Some("Pepper warmup".to_string());
        assert!(filters.matches(&d));
    }

    #[test]
    fn test_combined_filters_use_and() {
        let filters =
            DrillFilters::from_query(Some("1"), Some("serve"), None, None, None, None);
        assert!(filters.matches(&drill(vec![1], &["serve", "block"])));
        assert!(!filters.matches(&drill(vec![1], &["block"])));
        assert!(!filters.matches(&drill(vec![2], &["serve"])));
    }
}
