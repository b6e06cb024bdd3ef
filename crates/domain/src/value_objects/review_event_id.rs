//! Review event identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique review event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewEventId(Uuid);

impl ReviewEventId {
    /// Create a new random review event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a review event ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ReviewEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReviewEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
