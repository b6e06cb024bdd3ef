//! Work item entity
//!
//! A learner's in-progress submission. Created and mutated by the submission
//! and review flows, which live outside this system; the digest job only
//! reads these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{CohortId, UserId, WorkItemId};

/// A learner's in-progress submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Unique identifier
    pub id: WorkItemId,
    /// The learner who owns this item
    pub owner: UserId,
    /// The cohort this item belongs to
    pub cohort: CohortId,
    /// When the item was submitted, if it has been
    pub submitted_at: Option<DateTime<Utc>>,
    /// When mentoring was requested, if it has been
    pub mentoring_requested_at: Option<DateTime<Utc>>,
    /// When the item was approved, if it has been
    pub approved_at: Option<DateTime<Utc>>,
    /// When the item was completed, if it has been
    pub completed_at: Option<DateTime<Utc>>,
    /// When a mentor last touched this item, if ever
    pub last_mentored_at: Option<DateTime<Utc>>,
    /// Number of mentors currently assigned
    pub assigned_mentor_count: u32,
}

impl WorkItem {
    /// Create a new work item with no lifecycle timestamps set
    #[must_use]
    pub const fn new(id: WorkItemId, owner: UserId, cohort: CohortId) -> Self {
        Self {
            id,
            owner,
            cohort,
            submitted_at: None,
            mentoring_requested_at: None,
            approved_at: None,
            completed_at: None,
            last_mentored_at: None,
            assigned_mentor_count: 0,
        }
    }

    /// Mark the item submitted
    #[must_use]
    pub const fn submitted(mut self, at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(at);
        self
    }

    /// Mark mentoring as requested
    #[must_use]
    pub const fn requesting_review(mut self, at: DateTime<Utc>) -> Self {
        self.mentoring_requested_at = Some(at);
        self
    }

    /// Mark the item approved
    #[must_use]
    pub const fn approved(mut self, at: DateTime<Utc>) -> Self {
        self.approved_at = Some(at);
        self
    }

    /// Mark the item completed
    #[must_use]
    pub const fn completed(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = Some(at);
        self
    }

    /// Record the most recent mentor touch
    #[must_use]
    pub const fn last_mentored(mut self, at: DateTime<Utc>) -> Self {
        self.last_mentored_at = Some(at);
        self
    }

    /// Set the number of currently assigned mentors
    #[must_use]
    pub const fn with_assigned_mentors(mut self, count: u32) -> Self {
        self.assigned_mentor_count = count;
        self
    }

    /// Whether mentoring has been requested for this item
    pub const fn is_requesting_review(&self) -> bool {
        self.mentoring_requested_at.is_some()
    }

    /// The live backlog predicate: submitted, mentoring requested, not yet
    /// approved or completed, and no mentor assigned
    ///
    /// This is a snapshot of the current record, deliberately independent of
    /// any rolling window.
    pub const fn awaiting_mentor(&self) -> bool {
        self.submitted_at.is_some()
            && self.mentoring_requested_at.is_some()
            && self.approved_at.is_none()
            && self.completed_at.is_none()
            && self.assigned_mentor_count == 0
    }
}
