//! Domain entities

mod activity_event;
mod cohort;
mod digest;
mod mentor;
mod review_event;
mod work_item;

pub use activity_event::ActivityEvent;
pub use cohort::Cohort;
pub use digest::{CohortStats, DigestPayload, MergedCohortStats, SiteStats};
pub use mentor::Mentor;
pub use review_event::ReviewEvent;
pub use work_item::WorkItem;
