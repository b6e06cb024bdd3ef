//! Digest report types
//!
//! The value structs the aggregation engine produces and the notification
//! collaborator consumes. Cohort maps are ordered by `CohortId` so a payload
//! serializes identically across runs over the same data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::CohortId;

/// Site-wide totals for one statistics window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    /// Work items that are new in the window
    pub new_items: u64,
    /// New items with a pending mentoring request
    pub new_items_requesting_review: u64,
    /// Review events since the window start
    pub review_events: u64,
    /// Distinct learners owning the new items
    pub learners: u64,
    /// Distinct mentors who reviewed items last mentored inside the window
    pub active_reviewers: u64,
}

/// Per-cohort totals for one statistics window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortStats {
    /// Cohort display title
    pub title: String,
    /// New items belonging to this cohort
    pub new_items: u64,
    /// New items in this cohort with a pending mentoring request
    pub items_requesting_review: u64,
    /// Review events since the window start targeting this cohort
    pub review_events: u64,
    /// Items currently awaiting a mentor (live snapshot, not window-bounded)
    pub queue_depth: u64,
}

impl CohortStats {
    /// A zero-valued record carrying only the cohort title
    #[must_use]
    pub fn idle(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether every counter in this record is zero
    pub const fn is_idle(&self) -> bool {
        self.new_items == 0
            && self.items_requesting_review == 0
            && self.review_events == 0
            && self.queue_depth == 0
    }
}

/// Cohort totals merged with one mentor's personal contribution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedCohortStats {
    /// The cohort-wide totals
    #[serde(flatten)]
    pub cohort: CohortStats,
    /// Review events this mentor personally performed in the window
    pub reviewed_by_you: u64,
}

impl MergedCohortStats {
    /// Merge cohort totals with a personal review count
    #[must_use]
    pub const fn new(cohort: CohortStats, reviewed_by_you: u64) -> Self {
        Self {
            cohort,
            reviewed_by_you,
        }
    }

    /// Whether both the cohort totals and the personal count are zero
    pub const fn is_idle(&self) -> bool {
        self.cohort.is_idle() && self.reviewed_by_you == 0
    }
}

/// The complete payload handed to the notification collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestPayload {
    /// Site-wide totals
    pub site: SiteStats,
    /// Per-cohort merged totals, one entry per cohort in the digest
    pub cohorts: BTreeMap<CohortId, MergedCohortStats>,
}

impl DigestPayload {
    /// Create a payload from site totals and merged cohort records
    #[must_use]
    pub const fn new(site: SiteStats, cohorts: BTreeMap<CohortId, MergedCohortStats>) -> Self {
        Self { site, cohorts }
    }

    /// Whether the payload carries no cohort records at all
    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}
