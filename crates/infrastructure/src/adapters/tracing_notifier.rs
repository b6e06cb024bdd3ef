//! Log-backed notification adapter
//!
//! The real digest transport (templating, mail delivery) lives outside this
//! system. This adapter satisfies the dispatch port by rendering the payload
//! into structured logs, which is what local runs and smoke tests need.

use application::error::ApplicationError;
use application::ports::{DigestKind, NotificationPort};
use async_trait::async_trait;
use domain::entities::DigestPayload;
use domain::value_objects::MentorId;
use tracing::info;

/// `NotificationPort` adapter that writes digests to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    /// Create a new tracing notifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPort for TracingNotifier {
    async fn send_digest(
        &self,
        recipient: MentorId,
        kind: DigestKind,
        payload: &DigestPayload,
        introduction: Option<String>,
    ) -> Result<(), ApplicationError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApplicationError::Dispatch(format!("payload encoding failed: {e}")))?;
        info!(
            recipient = %recipient,
            kind = ?kind,
            first_digest = introduction.is_some(),
            payload = %body,
            "Digest dispatched to log transport"
        );
        Ok(())
    }
}
