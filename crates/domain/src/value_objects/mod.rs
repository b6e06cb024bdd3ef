//! Value objects for the mentoring domain

mod activity_event_id;
mod cohort_id;
mod mentor_id;
mod review_event_id;
mod time_window;
mod user_id;
mod work_item_id;

pub use activity_event_id::ActivityEventId;
pub use cohort_id::CohortId;
pub use mentor_id::MentorId;
pub use review_event_id::ReviewEventId;
pub use time_window::{DEFAULT_ACTIVE_LOOKBACK_DAYS, DEFAULT_STATS_PERIOD_DAYS, TimeWindow};
pub use user_id::UserId;
pub use work_item_id::WorkItemId;
