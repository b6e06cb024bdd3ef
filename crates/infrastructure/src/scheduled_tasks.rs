//! Factory functions for scheduled tasks
//!
//! The digest job is a periodic batch run driven by an external scheduler.
//! This module hands the scheduler a pre-built task closure.

use std::sync::Arc;

use application::ports::PlatformRepository;
use application::services::DigestService;
use chrono::Utc;
use futures::future::BoxFuture;
use tracing::{error, info};

/// Task name for the mentor heartbeat run
pub const MENTOR_HEARTBEAT_TASK: &str = "mentor_heartbeat";

/// Create a mentor heartbeat task closure
///
/// Each invocation anchors a fresh run at the current time. Designed to run
/// weekly; runs more often are harmless because the throttle skips mentors
/// notified recently.
pub fn create_mentor_heartbeat_task<R: PlatformRepository + 'static>(
    digest_service: Arc<DigestService<R>>,
) -> impl Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync + 'static {
    move || {
        let service = Arc::clone(&digest_service);

        Box::pin(async move {
            match service.run(Utc::now()).await {
                Ok(report) => {
                    info!(
                        considered = report.considered,
                        sent = report.sent,
                        first_sends = report.first_sends,
                        throttled = report.throttled,
                        empty = report.empty,
                        failed = report.failed,
                        "Mentor heartbeat task completed"
                    );
                    Ok(())
                },
                Err(e) => {
                    error!(error = %e, "Mentor heartbeat task failed");
                    Err(format!("Mentor heartbeat run failed: {e}"))
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use application::services::DigestServiceConfig;

    use super::*;
    use crate::adapters::TracingNotifier;
    use crate::persistence::InMemoryPlatform;

    #[tokio::test]
    async fn heartbeat_task_runs_against_an_empty_platform() {
        let platform = Arc::new(InMemoryPlatform::new());
        let service = Arc::new(DigestService::new(
            Arc::clone(&platform),
            Arc::new(TracingNotifier::new()),
            platform,
            DigestServiceConfig::default(),
        ));

        let task = create_mentor_heartbeat_task(service);
        let result = task().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn heartbeat_task_reports_configuration_errors() {
        let platform = Arc::new(InMemoryPlatform::new());
        let config = DigestServiceConfig {
            throttle_days: 0,
            ..DigestServiceConfig::default()
        };
        let service = Arc::new(DigestService::new(
            Arc::clone(&platform),
            Arc::new(TracingNotifier::new()),
            platform,
            config,
        ));

        let task = create_mentor_heartbeat_task(service);
        let result = task().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("heartbeat run failed"));
    }
}
