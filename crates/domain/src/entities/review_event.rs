//! Review event entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CohortId, MentorId, ReviewEventId, WorkItemId};

/// One mentoring action taken against a work item
///
/// The cohort is carried on the event itself; the data-access collaborator
/// resolves it from the target work item when the event is recorded, so
/// aggregation never needs a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// Unique identifier
    pub id: ReviewEventId,
    /// The mentor who acted
    pub mentor: MentorId,
    /// The work item that was reviewed
    pub work_item: WorkItemId,
    /// The cohort of the reviewed work item
    pub cohort: CohortId,
    /// When the review happened
    pub created_at: DateTime<Utc>,
}

impl ReviewEvent {
    /// Create a new review event
    #[must_use]
    pub fn new(
        mentor: MentorId,
        work_item: WorkItemId,
        cohort: CohortId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReviewEventId::new(),
            mentor,
            work_item,
            cohort,
            created_at,
        }
    }
}
