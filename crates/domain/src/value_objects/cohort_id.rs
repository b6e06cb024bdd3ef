//! Cohort identifier value object
//!
//! Ordered so digest payloads can key cohorts deterministically.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique cohort identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CohortId(Uuid);

impl CohortId {
    /// Create a new random cohort ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a cohort ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a cohort ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CohortId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CohortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CohortId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
