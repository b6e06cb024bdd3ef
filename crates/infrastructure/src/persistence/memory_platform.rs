//! In-memory platform store
//!
//! Seedable implementation of the data-access and notification-log ports,
//! used by the integration tests and local runs. The real platform keeps
//! these records in its own database; this adapter answers the same queries
//! from process memory.

use std::collections::{HashMap, HashSet};

use application::error::ApplicationError;
use application::ports::{NotificationLogPort, PlatformRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{ActivityEvent, Cohort, Mentor, ReviewEvent, WorkItem};
use domain::value_objects::{MentorId, WorkItemId};
use parking_lot::RwLock;

#[derive(Debug, Default)]
struct State {
    cohorts: Vec<Cohort>,
    mentors: Vec<Mentor>,
    work_items: HashMap<WorkItemId, WorkItem>,
    activity: Vec<ActivityEvent>,
    reviews: Vec<ReviewEvent>,
    heartbeats: HashMap<MentorId, DateTime<Utc>>,
}

/// In-memory implementation of `PlatformRepository` and `NotificationLogPort`
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: RwLock<State>,
}

impl InMemoryPlatform {
    /// Create an empty platform
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a cohort
    pub fn add_cohort(&self, cohort: Cohort) {
        self.state.write().cohorts.push(cohort);
    }

    /// Seed a mentor
    pub fn add_mentor(&self, mentor: Mentor) {
        self.state.write().mentors.push(mentor);
    }

    /// Seed a work item
    pub fn add_work_item(&self, item: WorkItem) {
        self.state.write().work_items.insert(item.id, item);
    }

    /// Record one unit of learner progress on a work item
    pub fn record_activity(&self, item: WorkItemId, at: DateTime<Utc>) {
        self.state.write().activity.push(ActivityEvent::new(item, at));
    }

    /// Record a mentoring action against a work item
    ///
    /// Resolves the cohort from the target item and stamps the item's
    /// last-mentored timestamp, the way the platform's review flow does.
    /// Ignored when the item is unknown.
    pub fn record_review(&self, mentor: MentorId, item: WorkItemId, at: DateTime<Utc>) {
        let mut state = self.state.write();
        let Some(record) = state.work_items.get_mut(&item) else {
            return;
        };
        let cohort = record.cohort;
        record.last_mentored_at = Some(match record.last_mentored_at {
            Some(prev) if prev > at => prev,
            _ => at,
        });
        state.reviews.push(ReviewEvent::new(mentor, item, cohort, at));
    }

    /// Seed a pre-existing heartbeat log entry
    pub fn set_last_heartbeat(&self, mentor: MentorId, at: DateTime<Utc>) {
        self.state.write().heartbeats.insert(mentor, at);
    }

    /// Inspect a mentor's heartbeat log entry
    #[must_use]
    pub fn last_heartbeat_for(&self, mentor: MentorId) -> Option<DateTime<Utc>> {
        self.state.read().heartbeats.get(&mentor).copied()
    }
}

#[async_trait]
impl PlatformRepository for InMemoryPlatform {
    async fn cohorts(&self) -> Result<Vec<Cohort>, ApplicationError> {
        Ok(self.state.read().cohorts.clone())
    }

    async fn active_mentors(&self, since: DateTime<Utc>) -> Result<Vec<Mentor>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .mentors
            .iter()
            .filter(|mentor| {
                state
                    .reviews
                    .iter()
                    .any(|review| review.mentor == mentor.id && review.created_at >= since)
            })
            .cloned()
            .collect())
    }

    async fn activity_events_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityEvent>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .activity
            .iter()
            .filter(|event| event.created_at >= since)
            .cloned()
            .collect())
    }

    async fn items_with_activity_before(
        &self,
        before: DateTime<Utc>,
    ) -> Result<HashSet<WorkItemId>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .activity
            .iter()
            .filter(|event| event.created_at < before)
            .map(|event| event.work_item)
            .collect())
    }

    async fn review_events_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<ReviewEvent>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .reviews
            .iter()
            .filter(|review| review.created_at >= since)
            .cloned()
            .collect())
    }

    async fn review_events_by_mentor_since(
        &self,
        mentor: MentorId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ReviewEvent>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .reviews
            .iter()
            .filter(|review| review.mentor == mentor && review.created_at >= since)
            .cloned()
            .collect())
    }

    async fn review_events_for_items(
        &self,
        items: &[WorkItemId],
    ) -> Result<Vec<ReviewEvent>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .reviews
            .iter()
            .filter(|review| items.contains(&review.work_item))
            .cloned()
            .collect())
    }

    async fn items_mentored_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<WorkItemId>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .work_items
            .values()
            .filter(|item| item.last_mentored_at.is_some_and(|at| at >= since))
            .map(|item| item.id)
            .collect())
    }

    async fn work_items_by_id(
        &self,
        ids: &[WorkItemId],
    ) -> Result<Vec<WorkItem>, ApplicationError> {
        let state = self.state.read();
        Ok(ids
            .iter()
            .filter_map(|id| state.work_items.get(id))
            .cloned()
            .collect())
    }

    async fn backlog_items(&self) -> Result<Vec<WorkItem>, ApplicationError> {
        let state = self.state.read();
        Ok(state
            .work_items
            .values()
            .filter(|item| item.awaiting_mentor())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationLogPort for InMemoryPlatform {
    async fn last_heartbeat(
        &self,
        mentor: MentorId,
    ) -> Result<Option<DateTime<Utc>>, ApplicationError> {
        Ok(self.state.read().heartbeats.get(&mentor).copied())
    }

    async fn record_heartbeat(
        &self,
        mentor: MentorId,
        sent_at: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        self.state.write().heartbeats.insert(mentor, sent_at);
        Ok(())
    }
}
