//! Testing utilities for the drill catalog
//!
//! This crate provides:
//! - Fixtures producing drills, comments and ratings with realistic data
//! - Builders for request payloads
//! - An in-memory store implementing every repository port
//! - A PostgreSQL test database helper for ignored integration tests
//!
//! # Examples
//!
//! ```
//! use drill_catalog_testing::{builders::*, mocks::InMemoryCatalog};
//!
//! let catalog = InMemoryCatalog::new();
//! let request = CreateDrillRequestBuilder::new()
//!     .with_title("Pepper warmup")
//!     .with_levels(vec![1, 2])
//!     .build();
//! assert!(catalog.is_empty());
//! assert_eq!(request.levels, vec![1, 2]);
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
