//! New-in-window item set
//!
//! A work item is new in window `W` iff it has at least one activity event
//! with `W.stats_start <= created_at < W.now` and no activity event before
//! `W.stats_start`. An item with zero events is never new; the vacuous "no
//! earlier event" is not enough.
//!
//! The set is computed once per run and shared by the site-wide and
//! per-cohort aggregators, so the two can never drift apart.

use std::collections::{BTreeSet, HashSet};

use domain::entities::ActivityEvent;
use domain::value_objects::{TimeWindow, WorkItemId};

/// Compute the set of work items that are new in `window`
///
/// `events_since_start` holds the activity events created at or after
/// `window.stats_start()`; `items_with_prior_activity` holds every item with
/// at least one event strictly before it. The result is ordered so payloads
/// built from it are deterministic.
pub fn new_item_set(
    window: &TimeWindow,
    events_since_start: &[ActivityEvent],
    items_with_prior_activity: &HashSet<WorkItemId>,
) -> BTreeSet<WorkItemId> {
    events_since_start
        .iter()
        .filter(|event| window.contains(event.created_at))
        .map(|event| event.work_item)
        .filter(|item| !items_with_prior_activity.contains(item))
        .collect()
}
