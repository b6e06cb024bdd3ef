//! Data-access port for the mentoring platform
//!
//! The digest job never owns persistence; every record it aggregates comes
//! through this interface. Adapters may back it with whatever store the
//! platform uses.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{ActivityEvent, Cohort, Mentor, ReviewEvent, WorkItem};
use domain::value_objects::{MentorId, WorkItemId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for querying mentoring platform records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlatformRepository: Send + Sync {
    /// All cohorts, including those with no recent activity
    async fn cohorts(&self) -> Result<Vec<Cohort>, ApplicationError>;

    /// Mentors with at least one review event since `since`
    async fn active_mentors(&self, since: DateTime<Utc>) -> Result<Vec<Mentor>, ApplicationError>;

    /// Activity events created at or after `since`
    async fn activity_events_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, ApplicationError>;

    /// Work items with at least one activity event strictly before `before`
    async fn items_with_activity_before(
        &self,
        before: DateTime<Utc>,
    ) -> Result<HashSet<WorkItemId>, ApplicationError>;

    /// Review events created at or after `since`
    async fn review_events_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ReviewEvent>, ApplicationError>;

    /// Review events by one mentor created at or after `since`
    async fn review_events_by_mentor_since(
        &self,
        mentor: MentorId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ReviewEvent>, ApplicationError>;

    /// All review events targeting the given work items, regardless of age
    async fn review_events_for_items(
        &self,
        items: &[WorkItemId],
    ) -> Result<Vec<ReviewEvent>, ApplicationError>;

    /// Work items last touched by a mentor at or after `since`
    async fn items_mentored_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<WorkItemId>, ApplicationError>;

    /// Full records for the given work item ids
    async fn work_items_by_id(
        &self,
        ids: &[WorkItemId],
    ) -> Result<Vec<WorkItem>, ApplicationError>;

    /// Current snapshot of items awaiting a mentor (the backlog predicate)
    async fn backlog_items(&self) -> Result<Vec<WorkItem>, ApplicationError>;
}
