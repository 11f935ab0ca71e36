//! Drill records and listing aggregates.

use crate::errors::{DomainResult, ValidationError};
use crate::identifiers::DrillId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use url::Url;

/// Longest URL accepted for a drill video
pub const MAX_URL_LENGTH: usize = 2083;

/// Video hosting platform a drill URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// youtube.com, youtu.be
    Youtube,
    /// instagram.com
    Instagram,
    /// tiktok.com
    Tiktok,
    /// vimeo.com
    Vimeo,
    /// Anything else
    #[default]
    Other,
}

impl Platform {
    /// All known platforms
    pub fn all() -> &'static [Platform] {
        &[
            Self::Youtube,
            Self::Instagram,
            Self::Tiktok,
            Self::Vimeo,
            Self::Other,
        ]
    }

    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::Vimeo => "vimeo",
            Self::Other => "other",
        }
    }

    /// Parse a stored value; unknown values fall back to [`Platform::Other`]
    pub fn parse(value: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }

    fn from_host(host: &str) -> Self {
        if host_matches(host, "youtube.com")
            || host_matches(host, "youtu.be")
            || host_matches(host, "youtube-nocookie.com")
        {
            Self::Youtube
        } else if host_matches(host, "instagram.com") {
            Self::Instagram
        } else if host_matches(host, "tiktok.com") {
            Self::Tiktok
        } else if host_matches(host, "vimeo.com") {
            Self::Vimeo
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Parse and canonicalize a drill video URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted. The returned
/// value serializes to the canonical string that gets stored.
pub fn canonicalize_url(raw: &str) -> DomainResult<Url> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUrl("URL cannot be empty".to_string()));
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(ValidationError::InvalidUrl(format!(
            "URL must be {} characters or less",
            MAX_URL_LENGTH
        )));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ValidationError::InvalidUrl(format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl(
            "URL must use HTTP or HTTPS scheme".to_string(),
        ));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl("URL must include a host".to_string()));
    }

    Ok(url)
}

/// Work out which platform hosts a video and, when recognisable, its id.
pub fn detect_video(url: &Url) -> (Platform, Option<String>) {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let platform = Platform::from_host(&host);

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    let video_id = match platform {
        Platform::Youtube if host_matches(&host, "youtu.be") => {
            segments.first().map(|s| s.to_string())
        }
        Platform::Youtube => match segments.as_slice() {
            [] | ["watch", ..] => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            ["shorts" | "embed" | "live" | "v", id, ..] => Some(id.to_string()),
            _ => None,
        },
        Platform::Instagram => match segments.as_slice() {
            ["p" | "reel" | "reels" | "tv", id, ..] => Some(id.to_string()),
            _ => None,
        },
        Platform::Tiktok => segments
            .windows(2)
            .find(|pair| pair[0] == "video")
            .map(|pair| pair[1].to_string()),
        Platform::Vimeo => segments
            .iter()
            .find(|s| s.chars().all(|c| c.is_ascii_digit()))
            .map(|s| s.to_string()),
        Platform::Other => None,
    };

    (platform, video_id.filter(|id| !id.is_empty()))
}

/// Trim string tags, drop empty ones and remove duplicates (first one wins).
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !normalized.iter().any(|existing| existing == tag) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}

/// Remove duplicate levels, keeping the first occurrence.
pub fn normalize_levels<I>(levels: I) -> Vec<i32>
where
    I: IntoIterator<Item = i32>,
{
    let mut normalized = Vec::new();
    for level in levels {
        if !normalized.contains(&level) {
            normalized.push(level);
        }
    }
    normalized
}

/// Evaluation columns from before ratings existed.
///
/// Still stored, never written by the service and never used to decide
/// whether a drill has been tested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyEvaluation {
    /// Manually set tested flag
    pub tested: bool,
    /// Manually entered rating
    pub tested_rating: Option<i32>,
    /// Manually entered notes
    pub tested_notes: Option<String>,
}

/// A stored drill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    /// Identifier
    pub id: DrillId,
    /// Optional display title
    pub title: Option<String>,
    /// Canonical video URL
    pub url: String,
    /// Platform derived from the URL
    pub platform: Platform,
    /// Video id derived from the URL
    pub video_id: Option<String>,
    /// Skill-level tags
    pub levels: Vec<i32>,
    /// Fundamental tags (serve, receive, ...)
    pub fundamentals: Vec<String>,
    /// Drill type tags (warmup, technical, ...)
    pub drill_types: Vec<String>,
    /// Whether the coach takes part in the drill
    pub coach_participates: Option<bool>,
    /// Whether the drill works with a large group
    pub good_for_many_players: Option<bool>,
    /// Minimum number of players
    pub min_players: Option<i32>,
    /// Maximum number of players
    pub max_players: Option<i32>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Legacy evaluation columns
    pub legacy: LegacyEvaluation,
    /// Who added the drill
    pub created_by_name: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

impl Drill {
    /// Point the drill at a new video, re-deriving platform and video id
    pub fn set_url(&mut self, url: &Url) {
        let (platform, video_id) = detect_video(url);
        self.url = url.to_string();
        self.platform = platform;
        self.video_id = video_id;
    }
}

/// A drill that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDrill {
    /// Optional display title
    pub title: Option<String>,
    /// Canonical video URL
    pub url: String,
    /// Platform derived from the URL
    pub platform: Platform,
    /// Video id derived from the URL
    pub video_id: Option<String>,
    /// Skill-level tags
    pub levels: Vec<i32>,
    /// Fundamental tags
    pub fundamentals: Vec<String>,
    /// Drill type tags
    pub drill_types: Vec<String>,
    /// Whether the coach takes part in the drill
    pub coach_participates: Option<bool>,
    /// Whether the drill works with a large group
    pub good_for_many_players: Option<bool>,
    /// Minimum number of players
    pub min_players: Option<i32>,
    /// Maximum number of players
    pub max_players: Option<i32>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Who added the drill
    pub created_by_name: String,
}

impl NewDrill {
    /// Start a drill for the given video with every optional field empty
    pub fn new(url: &Url, created_by_name: impl Into<String>) -> Self {
        let (platform, video_id) = detect_video(url);
        Self {
            title: None,
            url: url.to_string(),
            platform,
            video_id,
            levels: Vec::new(),
            fundamentals: Vec::new(),
            drill_types: Vec::new(),
            coach_participates: None,
            good_for_many_players: None,
            min_players: None,
            max_players: None,
            notes: None,
            created_by_name: created_by_name.into(),
        }
    }

    /// Materialize the stored record once the store has assigned identity
    pub fn into_drill(self, id: DrillId, created_at: DateTime<Utc>) -> Drill {
        Drill {
            id,
            title: self.title,
            url: self.url,
            platform: self.platform,
            video_id: self.video_id,
            levels: self.levels,
            fundamentals: self.fundamentals,
            drill_types: self.drill_types,
            coach_participates: self.coach_participates,
            good_for_many_players: self.good_for_many_players,
            min_players: self.min_players,
            max_players: self.max_players,
            notes: self.notes,
            legacy: LegacyEvaluation::default(),
            created_by_name: self.created_by_name,
            created_at,
        }
    }
}

/// Comment and rating aggregates for one drill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrillStats {
    /// Number of comments
    pub comments_count: i64,
    /// Number of ratings
    pub ratings_count: i64,
    /// Mean rating score, absent without ratings
    pub avg_rating: Option<f64>,
}

impl DrillStats {
    /// Compute aggregates from a comment count and the rating scores
    pub fn from_parts(comments_count: usize, scores: &[i32]) -> Self {
        let avg_rating = if scores.is_empty() {
            None
        } else {
            let total: i64 = scores.iter().map(|s| i64::from(*s)).sum();
            Some(total as f64 / scores.len() as f64)
        };

        Self {
            comments_count: comments_count as i64,
            ratings_count: scores.len() as i64,
            avg_rating,
        }
    }

    /// A drill counts as tested once anyone has rated it
    pub fn tested(&self) -> bool {
        self.ratings_count > 0
    }
}

/// A drill together with its aggregates, as served by listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSummary {
    /// The stored drill
    pub drill: Drill,
    /// Its aggregates
    pub stats: DrillStats,
}

impl DrillSummary {
    /// Summary for a drill nobody has commented on or rated yet
    pub fn fresh(drill: Drill) -> Self {
        Self {
            drill,
            stats: DrillStats::default(),
        }
    }

    /// Listing order: rated drills first, best average first (unrated last),
    /// then most ratings, most comments and newest.
    pub fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.stats
            .tested()
            .cmp(&a.stats.tested())
            .then_with(|| match (a.stats.avg_rating, b.stats.avg_rating) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| b.stats.ratings_count.cmp(&a.stats.ratings_count))
            .then_with(|| b.stats.comments_count.cmp(&a.stats.comments_count))
            .then_with(|| b.drill.created_at.cmp(&a.drill.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(raw: &str) -> (Platform, Option<String>) {
        detect_video(&canonicalize_url(raw).unwrap())
    }

    #[test]
    fn test_youtube_detection() {
        assert_eq!(
            detect("https://youtube.com/watch?v=abc"),
            (Platform::Youtube, Some("abc".to_string()))
        );
        assert_eq!(
            detect("https://www.youtube.com/watch?feature=share&v=xyz123"),
            (Platform::Youtube, Some("xyz123".to_string()))
        );
        assert_eq!(
            detect("https://youtu.be/dQw4w9WgXcQ?t=42"),
            (Platform::Youtube, Some("dQw4w9WgXcQ".to_string()))
        );
        assert_eq!(
            detect("https://m.youtube.com/shorts/short1"),
            (Platform::Youtube, Some("short1".to_string()))
        );
        assert_eq!(
            detect("https://www.youtube.com/@coach"),
            (Platform::Youtube, None)
        );
    }

    #[test]
    fn test_other_platforms() {
        assert_eq!(
            detect("https://www.instagram.com/reel/Cx1_ab/"),
            (Platform::Instagram, Some("Cx1_ab".to_string()))
        );
        assert_eq!(
            detect("https://www.tiktok.com/@coach/video/7212345"),
            (Platform::Tiktok, Some("7212345".to_string()))
        );
        assert_eq!(
            detect("https://vimeo.com/123456"),
            (Platform::Vimeo, Some("123456".to_string()))
        );
        assert_eq!(
            detect("https://example.com/drills/1"),
            (Platform::Other, None)
        );
    }

    #[test]
    fn test_lookalike_hosts_are_not_matched() {
        assert_eq!(detect("https://notyoutube.com/watch?v=abc").0, Platform::Other);
    }

    #[test]
    fn test_canonicalize_url() {
        let url = canonicalize_url("  HTTPS://Example.COM  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");

        assert!(canonicalize_url("").is_err());
        assert!(canonicalize_url("not a url").is_err());
        assert!(canonicalize_url("ftp://example.com/file").is_err());
        assert!(canonicalize_url("mailto:coach@example.com").is_err());

        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(canonicalize_url(&long).is_err());
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("youtube"), Platform::Youtube);
        assert_eq!(Platform::parse("TikTok"), Platform::Tiktok);
        assert_eq!(Platform::parse("myspace"), Platform::Other);
        assert_eq!(serde_json::to_string(&Platform::Vimeo).unwrap(), "\"vimeo\"");
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(vec![" serve ", "", "receive", "serve", "  "]);
        assert_eq!(tags, vec!["serve".to_string(), "receive".to_string()]);
        assert_eq!(normalize_levels(vec![2, 1, 2, 3, 1]), vec![2, 1, 3]);
    }

    #[test]
    fn test_stats() {
        let empty = DrillStats::from_parts(3, &[]);
        assert_eq!(empty.comments_count, 3);
        assert_eq!(empty.avg_rating, None);
        assert!(!empty.tested());

        let stats = DrillStats::from_parts(0, &[9, 5]);
        assert_eq!(stats.ratings_count, 2);
        assert_eq!(stats.avg_rating, Some(7.0));
        assert!(stats.tested());
    }

    #[test]
    fn test_set_url_rederives_platform() {
        let url = canonicalize_url("https://example.com/a").unwrap();
        let mut drill = NewDrill::new(&url, "Alice").into_drill(DrillId::new(), Utc::now());
        assert_eq!(drill.platform, Platform::Other);

        drill.set_url(&canonicalize_url("https://youtu.be/abc").unwrap());
        assert_eq!(drill.platform, Platform::Youtube);
        assert_eq!(drill.video_id.as_deref(), Some("abc"));
        assert_eq!(drill.url, "https://youtu.be/abc");
    }

    #[test]
    fn test_listing_order() {
        let url = canonicalize_url("https://example.com/a").unwrap();
        let drill = NewDrill::new(&url, "Alice").into_drill(DrillId::new(), Utc::now());

        let unrated = DrillSummary {
            drill: drill.clone(),
            stats: DrillStats::from_parts(5, &[]),
        };
        let good = DrillSummary {
            drill: drill.clone(),
            stats: DrillStats::from_parts(0, &[9]),
        };
        let better = DrillSummary {
            drill,
            stats: DrillStats::from_parts(0, &[10, 8, 10]),
        };

        let mut rows = vec![unrated.clone(), good.clone(), better.clone()];
        rows.sort_by(DrillSummary::listing_order);
        assert_eq!(rows, vec![better, good, unrated]);
    }
}
