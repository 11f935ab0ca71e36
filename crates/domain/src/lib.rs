//! Drill Catalog Domain Types
//!
//! This crate provides the core domain model for the drill catalog: volleyball
//! training drills and the comments and ratings attached to them.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **drill**: Drill records, video platform detection and listing aggregates
//! - **comment**: Free-text comments owned by a drill
//! - **rating**: Bounded scores owned by a drill
//! - **filters**: Listing filters and the parsing of their query-string form
//! - **errors**: Validation error types
//!
//! ## Usage
//!
//! ```rust
//! use drill_catalog_domain::{
//!     drill::{detect_video, canonicalize_url, Platform},
//!     filters::parse_level_list,
//! };
//!
//! let url = canonicalize_url("https://youtu.be/dQw4w9WgXcQ").unwrap();
//! let (platform, video_id) = detect_video(&url);
//! assert_eq!(platform, Platform::Youtube);
//! assert_eq!(video_id.as_deref(), Some("dQw4w9WgXcQ"));
//!
//! assert_eq!(parse_level_list("1, 2,x,,3"), vec![1, 2, 3]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comment;
pub mod drill;
pub mod errors;
pub mod filters;
pub mod identifiers;
pub mod rating;

// Re-export commonly used types
pub use comment::{Comment, NewComment};
pub use drill::{Drill, DrillStats, DrillSummary, LegacyEvaluation, NewDrill, Platform};
pub use errors::{DomainResult, ValidationError};
pub use filters::DrillFilters;
pub use identifiers::*;
pub use rating::{NewRating, Rating, Score};
