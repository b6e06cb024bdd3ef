//! Activity event entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActivityEventId, WorkItemId};

/// One recorded unit of learner progress on a work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Unique identifier
    pub id: ActivityEventId,
    /// The work item this event belongs to
    pub work_item: WorkItemId,
    /// When the event was recorded
    pub created_at: DateTime<Utc>,
}

impl ActivityEvent {
    /// Create a new activity event
    #[must_use]
    pub fn new(work_item: WorkItemId, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ActivityEventId::new(),
            work_item,
            created_at,
        }
    }
}
