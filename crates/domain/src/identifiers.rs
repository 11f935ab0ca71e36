//! Strongly-typed identifier types for the drill catalog.
//!
//! Each entity gets its own UUID newtype so a comment id can never be passed
//! where a drill id is expected. Ids are random (v4), matching the values the
//! database assigns with `gen_random_uuid()`.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $kind:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Entity name used in error messages
            pub const KIND: &'static str = $kind;

            /// Create a new random ID
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            #[inline]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get a reference to the underlying UUID
            #[inline]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to the underlying UUID
            #[inline]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parse an ID supplied by a client.
            ///
            /// A malformed value is reported as [`ValidationError::InvalidIdentifier`],
            /// which callers must keep distinct from "not found".
            pub fn parse(raw: &str) -> Result<Self, ValidationError> {
                raw.parse().map_err(|_| ValidationError::InvalidIdentifier {
                    kind: Self::KIND,
                    value: raw.to_string(),
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(DrillId, "drill", "Unique identifier for drills");

define_id!(CommentId, "comment", "Unique identifier for drill comments");

define_id!(RatingId, "rating", "Unique identifier for drill ratings");
