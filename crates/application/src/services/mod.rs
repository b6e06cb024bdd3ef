//! Application services - the digest job's moving parts

mod digest_service;
mod heartbeat_throttle;
mod new_item_set;
mod stats_service;

pub use digest_service::{
    DigestRunReport, DigestService, DigestServiceConfig, IdleCohortPolicy,
};
pub use heartbeat_throttle::{DEFAULT_THROTTLE_DAYS, HeartbeatDecision, HeartbeatThrottle};
pub use new_item_set::new_item_set;
pub use stats_service::{StatsService, StatsSnapshot};
