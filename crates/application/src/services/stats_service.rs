//! Statistics aggregation
//!
//! Computes the shared per-run snapshot (site-wide totals plus a total map
//! of per-cohort totals) and each mentor's personal per-cohort review
//! counts. The snapshot is built once before the mentor loop and handed to
//! every iteration by reference, so all mentors in a run see identical
//! numbers.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use domain::entities::{CohortStats, Mentor, SiteStats};
use domain::value_objects::{CohortId, MentorId, TimeWindow, UserId, WorkItemId};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::PlatformRepository;
use crate::services::new_item_set::new_item_set;

/// Immutable per-run aggregation results shared across the mentor loop
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// The window every count in this snapshot was computed against
    pub window: TimeWindow,
    /// Work items that are new in the window
    pub new_items: BTreeSet<WorkItemId>,
    /// Site-wide totals
    pub site: SiteStats,
    /// Totals for every cohort, zero-valued where a cohort was idle
    pub cohorts: BTreeMap<CohortId, CohortStats>,
}

/// Aggregation engine over the platform repository
pub struct StatsService<R: PlatformRepository> {
    repo: Arc<R>,
}

impl<R: PlatformRepository> fmt::Debug for StatsService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsService").finish_non_exhaustive()
    }
}

impl<R: PlatformRepository> Clone for StatsService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: PlatformRepository> StatsService<R> {
    /// Create a new stats service
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Compute the shared snapshot for one run
    ///
    /// The new-item set is computed exactly once and reused by both the
    /// site-wide and the per-cohort aggregation.
    #[instrument(skip_all, fields(stats_start = %window.stats_start()))]
    pub async fn snapshot(&self, window: &TimeWindow) -> Result<StatsSnapshot, ApplicationError> {
        let stats_start = window.stats_start();

        let events = self.repo.activity_events_since(stats_start).await?;
        let prior = self.repo.items_with_activity_before(stats_start).await?;
        let new_items = new_item_set(window, &events, &prior);

        let ids: Vec<WorkItemId> = new_items.iter().copied().collect();
        let new_records = self.repo.work_items_by_id(&ids).await?;

        let reviews: Vec<_> = self
            .repo
            .review_events_since(stats_start)
            .await?
            .into_iter()
            .filter(|review| window.contains(review.created_at))
            .collect();

        let site = {
            let requesting = new_records
                .iter()
                .filter(|item| item.is_requesting_review())
                .count() as u64;
            let learners: HashSet<UserId> = new_records.iter().map(|item| item.owner).collect();

            let recently_mentored = self.repo.items_mentored_since(stats_start).await?;
            let mentorships = self.repo.review_events_for_items(&recently_mentored).await?;
            let reviewers: HashSet<MentorId> =
                mentorships.iter().map(|review| review.mentor).collect();

            SiteStats {
                new_items: new_items.len() as u64,
                new_items_requesting_review: requesting,
                review_events: reviews.len() as u64,
                learners: learners.len() as u64,
                active_reviewers: reviewers.len() as u64,
            }
        };

        let backlog = self.repo.backlog_items().await?;
        let mut queue_depths: BTreeMap<CohortId, u64> = BTreeMap::new();
        for item in &backlog {
            *queue_depths.entry(item.cohort).or_default() += 1;
        }

        // Every cohort gets a record, idle ones included.
        let mut cohorts = BTreeMap::new();
        for cohort in self.repo.cohorts().await? {
            let in_cohort: Vec<_> = new_records
                .iter()
                .filter(|item| item.cohort == cohort.id)
                .collect();
            let stats = CohortStats {
                title: cohort.title,
                new_items: in_cohort.len() as u64,
                items_requesting_review: in_cohort
                    .iter()
                    .filter(|item| item.is_requesting_review())
                    .count() as u64,
                review_events: reviews
                    .iter()
                    .filter(|review| review.cohort == cohort.id)
                    .count() as u64,
                queue_depth: queue_depths.get(&cohort.id).copied().unwrap_or(0),
            };
            cohorts.insert(cohort.id, stats);
        }

        debug!(
            new_items = site.new_items,
            review_events = site.review_events,
            cohorts = cohorts.len(),
            "Computed shared stats snapshot"
        );

        Ok(StatsSnapshot {
            window: *window,
            new_items,
            site,
            cohorts,
        })
    }

    /// Count one mentor's in-window review events per mentored cohort
    ///
    /// The result is total over exactly the cohorts the mentor mentors:
    /// cohorts with no personal events appear with a zero count, and events
    /// in cohorts the mentor is not assigned to are ignored.
    #[instrument(skip_all, fields(mentor = %mentor.id))]
    pub async fn personal_stats(
        &self,
        mentor: &Mentor,
        window: &TimeWindow,
    ) -> Result<BTreeMap<CohortId, u64>, ApplicationError> {
        let events = self
            .repo
            .review_events_by_mentor_since(mentor.id, window.stats_start())
            .await?;

        let mut counts: BTreeMap<CohortId, u64> =
            mentor.cohorts.iter().map(|cohort| (*cohort, 0)).collect();
        for event in events.iter().filter(|e| window.contains(e.created_at)) {
            if let Some(count) = counts.get_mut(&event.cohort) {
                *count += 1;
            }
        }

        Ok(counts)
    }
}
