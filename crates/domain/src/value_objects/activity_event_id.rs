//! Activity event identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique activity event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityEventId(Uuid);

impl ActivityEventId {
    /// Create a new random activity event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an activity event ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ActivityEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActivityEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
