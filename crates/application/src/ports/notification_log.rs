//! Notification log port
//!
//! Per-mentor record of when the last heartbeat digest went out. Read by the
//! throttle, written exclusively by the digest service after a successful
//! send.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::MentorId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the per-mentor notification log
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationLogPort: Send + Sync {
    /// When the mentor last received a heartbeat digest, if ever
    async fn last_heartbeat(
        &self,
        mentor: MentorId,
    ) -> Result<Option<DateTime<Utc>>, ApplicationError>;

    /// Record a successful heartbeat send
    async fn record_heartbeat(
        &self,
        mentor: MentorId,
        sent_at: DateTime<Utc>,
    ) -> Result<(), ApplicationError>;
}
