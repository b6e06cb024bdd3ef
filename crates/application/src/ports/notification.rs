//! Notification dispatch port
//!
//! The transport (templating, mail delivery) is an external collaborator;
//! this core only hands over a recipient, a template kind, the payload, and
//! an optional introduction for first-time recipients.

use async_trait::async_trait;
use domain::entities::DigestPayload;
use domain::value_objects::MentorId;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Which digest template the transport should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestKind {
    /// The weekly mentor heartbeat
    MentorHeartbeat,
}

/// Port for dispatching digest notifications
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Send a digest to a mentor
    ///
    /// `introduction` is present only on a mentor's first-ever digest.
    async fn send_digest(
        &self,
        recipient: MentorId,
        kind: DigestKind,
        payload: &DigestPayload,
        introduction: Option<String>,
    ) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn NotificationPort) {}

    #[test]
    fn digest_kind_serializes_snake_case() {
        let json = serde_json::to_string(&DigestKind::MentorHeartbeat).unwrap();
        assert_eq!(json, "\"mentor_heartbeat\"");
    }
}
