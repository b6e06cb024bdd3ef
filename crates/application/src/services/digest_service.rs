//! Mentor heartbeat digest job
//!
//! One invocation: build the run's time window, compute the shared stats
//! snapshot once, then walk the active mentors sequentially. Each mentor is
//! gated by the heartbeat throttle, gets the cohort-wide numbers merged with
//! their personal counts, and is dispatched a digest. The notification log
//! is written only after a successful send, so a failed mentor is naturally
//! retried by the next scheduled run.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use domain::entities::{DigestPayload, Mentor, MergedCohortStats};
use domain::value_objects::{
    CohortId, DEFAULT_ACTIVE_LOOKBACK_DAYS, DEFAULT_STATS_PERIOD_DAYS, TimeWindow,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{DigestKind, NotificationLogPort, NotificationPort, PlatformRepository};
use crate::services::heartbeat_throttle::{DEFAULT_THROTTLE_DAYS, HeartbeatThrottle};
use crate::services::stats_service::{StatsService, StatsSnapshot};

/// One-time preface included in a mentor's first-ever digest
const FIRST_DIGEST_INTRODUCTION: &str = "Starting today we'll send you a brief \
weekly summary on the state of each cohort you're mentoring, along with any \
changes to the mentoring side of the platform that happened during the week. \
If you have thoughts or ideas on what you'd like to see here, please open an \
issue. If you want to opt out, there's a link at the bottom of the email. \
Which leaves us just to say a huge thank you for your hard work!";

/// Whether cohorts with no activity at all appear in a mentor's digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdleCohortPolicy {
    /// Show idle cohorts as zero-valued rows
    #[default]
    Include,
    /// Drop cohorts whose merged record is entirely zero
    Prune,
}

/// Configuration for the digest job
#[derive(Debug, Clone)]
pub struct DigestServiceConfig {
    /// Rolling statistics period in days (default: 7)
    pub stats_period_days: i64,
    /// Mentor-activeness lookback in days (default: 21)
    pub active_lookback_days: i64,
    /// Minimum days between two digests to one mentor (default: 6)
    pub throttle_days: i64,
    /// Whether zero-activity cohorts appear in the digest
    pub idle_cohorts: IdleCohortPolicy,
    /// Replacement for the built-in first-digest introduction
    pub introduction: Option<String>,
}

impl Default for DigestServiceConfig {
    fn default() -> Self {
        Self {
            stats_period_days: DEFAULT_STATS_PERIOD_DAYS,
            active_lookback_days: DEFAULT_ACTIVE_LOOKBACK_DAYS,
            throttle_days: DEFAULT_THROTTLE_DAYS,
            idle_cohorts: IdleCohortPolicy::Include,
            introduction: None,
        }
    }
}

impl DigestServiceConfig {
    /// Check the configured day counts before a run starts
    ///
    /// Each count must be positive and representable as a `chrono::Duration`,
    /// so a misconfigured value surfaces as a `Configuration` error instead
    /// of a panic inside the duration arithmetic. The window ordering
    /// (lookback at least as long as the stats period) is validated by
    /// `TimeWindow` itself.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let counts = [
            ("stats_period_days", self.stats_period_days),
            ("active_lookback_days", self.active_lookback_days),
            ("throttle_days", self.throttle_days),
        ];
        for (name, days) in counts {
            if days <= 0 {
                return Err(ApplicationError::Configuration(format!(
                    "{name} must be positive, got {days}"
                )));
            }
            if Duration::try_days(days).is_none() {
                return Err(ApplicationError::Configuration(format!(
                    "{name} out of range: {days}"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome counters for one job invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DigestRunReport {
    /// Active mentors enumerated
    pub considered: u64,
    /// Digests dispatched successfully
    pub sent: u64,
    /// Of those, first-ever digests (introduction included)
    pub first_sends: u64,
    /// Mentors skipped by the throttle
    pub throttled: u64,
    /// Mentors with no merged cohort record (nothing to send)
    pub empty: u64,
    /// Mentors whose processing failed and will be retried next run
    pub failed: u64,
}

/// Per-mentor outcome inside one run
enum MentorOutcome {
    Sent { first: bool },
    Throttled,
    EmptyDigest,
}

/// The mentor heartbeat digest job
pub struct DigestService<R: PlatformRepository> {
    repo: Arc<R>,
    stats: StatsService<R>,
    notifier: Arc<dyn NotificationPort>,
    log: Arc<dyn NotificationLogPort>,
    throttle: HeartbeatThrottle,
    config: DigestServiceConfig,
}

impl<R: PlatformRepository> fmt::Debug for DigestService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R: PlatformRepository> DigestService<R> {
    /// Create a new digest service
    #[must_use]
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<dyn NotificationPort>,
        log: Arc<dyn NotificationLogPort>,
        config: DigestServiceConfig,
    ) -> Self {
        // An out-of-range interval is caught by validate() before the
        // throttle is ever consulted; zero here is only a placeholder.
        let throttle_interval =
            Duration::try_days(config.throttle_days).unwrap_or_else(Duration::zero);
        Self {
            stats: StatsService::new(Arc::clone(&repo)),
            repo,
            notifier,
            log,
            throttle: HeartbeatThrottle::new(throttle_interval),
            config,
        }
    }

    /// Run one digest pass anchored at `now`
    ///
    /// A malformed window or throttle configuration is fatal and aborts the
    /// run before any mentor is touched. Per-mentor failures are logged and
    /// counted; the loop continues.
    #[instrument(skip(self))]
    pub async fn run(&self, now: DateTime<Utc>) -> Result<DigestRunReport, ApplicationError> {
        self.config.validate()?;
        let window = TimeWindow::new(
            now,
            Duration::days(self.config.stats_period_days),
            Duration::days(self.config.active_lookback_days),
        )
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        info!(
            now = %window.now(),
            stats_start = %window.stats_start(),
            active_start = %window.active_start(),
            "Starting mentor heartbeat run"
        );

        // Shared aggregates come first so every mentor in this run sees the
        // same numbers.
        let snapshot = self.stats.snapshot(&window).await?;
        let mentors = self.repo.active_mentors(window.active_start()).await?;

        let mut report = DigestRunReport::default();
        for mentor in &mentors {
            report.considered += 1;
            match self.process_mentor(mentor, &window, &snapshot).await {
                Ok(MentorOutcome::Sent { first }) => {
                    report.sent += 1;
                    if first {
                        report.first_sends += 1;
                    }
                },
                Ok(MentorOutcome::Throttled) => report.throttled += 1,
                Ok(MentorOutcome::EmptyDigest) => report.empty += 1,
                Err(e) => {
                    warn!(mentor = %mentor.id, error = %e, "Mentor digest failed, continuing");
                    report.failed += 1;
                },
            }
        }

        info!(
            considered = report.considered,
            sent = report.sent,
            throttled = report.throttled,
            empty = report.empty,
            failed = report.failed,
            "Mentor heartbeat run finished"
        );
        Ok(report)
    }

    async fn process_mentor(
        &self,
        mentor: &Mentor,
        window: &TimeWindow,
        snapshot: &StatsSnapshot,
    ) -> Result<MentorOutcome, ApplicationError> {
        let last_sent = self.log.last_heartbeat(mentor.id).await?;
        let decision = self.throttle.evaluate(last_sent, window.now());
        if !decision.should_send() {
            debug!(mentor = %mentor.id, ?last_sent, "Throttled, digest sent recently");
            return Ok(MentorOutcome::Throttled);
        }

        let personal = self.stats.personal_stats(mentor, window).await?;
        let cohorts = self.merged_cohorts(mentor, snapshot, &personal);
        if cohorts.is_empty() {
            debug!(mentor = %mentor.id, "No cohort records to report, skipping dispatch");
            return Ok(MentorOutcome::EmptyDigest);
        }

        let introduction = decision.is_first().then(|| {
            self.config
                .introduction
                .clone()
                .unwrap_or_else(|| FIRST_DIGEST_INTRODUCTION.to_string())
        });

        let payload = DigestPayload::new(snapshot.site.clone(), cohorts);
        self.notifier
            .send_digest(mentor.id, DigestKind::MentorHeartbeat, &payload, introduction)
            .await?;

        // Only a confirmed send moves the throttle clock.
        self.log.record_heartbeat(mentor.id, window.now()).await?;

        info!(mentor = %mentor.id, first = decision.is_first(), "Digest dispatched");
        Ok(MentorOutcome::Sent {
            first: decision.is_first(),
        })
    }

    /// Total merge over the mentor's cohorts
    ///
    /// Every mentored cohort is present; the personal count defaults to zero
    /// and a cohort absent from the snapshot contributes a zero-valued
    /// record. Idle cohorts are then kept or pruned per policy.
    fn merged_cohorts(
        &self,
        mentor: &Mentor,
        snapshot: &StatsSnapshot,
        personal: &BTreeMap<CohortId, u64>,
    ) -> BTreeMap<CohortId, MergedCohortStats> {
        let mut merged = BTreeMap::new();
        for cohort in &mentor.cohorts {
            let stats = snapshot.cohorts.get(cohort).cloned().unwrap_or_default();
            let reviewed_by_you = personal.get(cohort).copied().unwrap_or(0);
            let record = MergedCohortStats::new(stats, reviewed_by_you);
            if self.config.idle_cohorts == IdleCohortPolicy::Prune && record.is_idle() {
                continue;
            }
            merged.insert(*cohort, record);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use domain::entities::{Cohort, ReviewEvent};
    use domain::value_objects::{MentorId, WorkItemId};
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::{
        MockNotificationLogPort, MockNotificationPort, MockPlatformRepository,
    };

    fn run_time() -> DateTime<Utc> {
        "2026-08-24T09:00:00Z".parse().unwrap()
    }

    /// Repository mock with one cohort, one mentor, and no activity
    fn quiet_repo(cohort: Cohort, mentors: Vec<Mentor>) -> MockPlatformRepository {
        let mut mock = MockPlatformRepository::new();
        let cohorts = vec![cohort];
        mock.expect_cohorts().returning(move || Ok(cohorts.clone()));
        mock.expect_active_mentors()
            .returning(move |_| Ok(mentors.clone()));
        mock.expect_activity_events_since().returning(|_| Ok(vec![]));
        mock.expect_items_with_activity_before()
            .returning(|_| Ok(std::collections::HashSet::new()));
        mock.expect_work_items_by_id().returning(|_| Ok(vec![]));
        mock.expect_review_events_since().returning(|_| Ok(vec![]));
        mock.expect_review_events_by_mentor_since()
            .returning(|_, _| Ok(vec![]));
        mock.expect_items_mentored_since().returning(|_| Ok(vec![]));
        mock.expect_review_events_for_items()
            .returning(|_| Ok(vec![]));
        mock.expect_backlog_items().returning(|| Ok(vec![]));
        mock
    }

    #[tokio::test]
    async fn recently_notified_mentor_is_throttled() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![mentor.clone()]);

        let mut log = MockNotificationLogPort::new();
        let five_days_ago = run_time() - Duration::days(5);
        log.expect_last_heartbeat()
            .with(eq(mentor.id))
            .returning(move |_| Ok(Some(five_days_ago)));
        log.expect_record_heartbeat().times(0);

        let mut notifier = MockNotificationPort::new();
        notifier.expect_send_digest().times(0);

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.considered, 1);
        assert_eq!(report.throttled, 1);
        assert_eq!(report.sent, 0);
    }

    #[tokio::test]
    async fn first_digest_carries_the_introduction() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![mentor.clone()]);

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat()
            .with(eq(mentor.id), eq(run_time()))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_send_digest()
            .withf(|_, kind, payload, introduction| {
                *kind == DigestKind::MentorHeartbeat
                    && !payload.is_empty()
                    && introduction.is_some()
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(report.first_sends, 1);
    }

    #[tokio::test]
    async fn repeat_digest_has_no_introduction() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![mentor]);

        let mut log = MockNotificationLogPort::new();
        let seven_days_ago = run_time() - Duration::days(7);
        log.expect_last_heartbeat()
            .returning(move |_| Ok(Some(seven_days_ago)));
        log.expect_record_heartbeat().times(1).returning(|_, _| Ok(()));

        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_send_digest()
            .withf(|_, _, _, introduction| introduction.is_none())
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(report.first_sends, 0);
    }

    #[tokio::test]
    async fn mentor_without_cohorts_never_triggers_a_dispatch() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let loner = Mentor::new(MentorId::new(), "solo");
        let repo = quiet_repo(cohort, vec![loner]);

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat().times(0);

        let mut notifier = MockNotificationPort::new();
        notifier.expect_send_digest().times(0);

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.empty, 1);
        assert_eq!(report.sent, 0);
    }

    #[tokio::test]
    async fn pruning_idle_cohorts_can_empty_a_digest() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![mentor]);

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat().times(0);

        let mut notifier = MockNotificationPort::new();
        notifier.expect_send_digest().times(0);

        let config = DigestServiceConfig {
            idle_cohorts: IdleCohortPolicy::Prune,
            ..DigestServiceConfig::default()
        };
        let service =
            DigestService::new(Arc::new(repo), Arc::new(notifier), Arc::new(log), config);
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.empty, 1);
    }

    #[tokio::test]
    async fn dispatch_failure_leaves_the_log_untouched() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let mentor = Mentor::new(MentorId::new(), "ada").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![mentor]);

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat().times(0);

        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_send_digest()
            .times(1)
            .returning(|_, _, _, _| Err(ApplicationError::Dispatch("bounced".to_string())));

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.sent, 0);
    }

    #[tokio::test]
    async fn one_failing_mentor_does_not_abort_the_loop() {
        let cohort = Cohort::new(CohortId::new(), "Alpha");
        let unlucky = Mentor::new(MentorId::new(), "unlucky").with_cohort(cohort.id);
        let lucky = Mentor::new(MentorId::new(), "lucky").with_cohort(cohort.id);
        let repo = quiet_repo(cohort, vec![unlucky.clone(), lucky.clone()]);

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat()
            .with(eq(lucky.id), eq(run_time()))
            .times(1)
            .returning(|_, _| Ok(()));

        let unlucky_id = unlucky.id;
        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_send_digest()
            .times(2)
            .returning(move |recipient, _, _, _| {
                if recipient == unlucky_id {
                    Err(ApplicationError::Dispatch("bounced".to_string()))
                } else {
                    Ok(())
                }
            });

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();

        assert_eq!(report.considered, 2);
        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn merged_payload_defaults_personal_counts_to_zero() {
        let active = Cohort::new(CohortId::new(), "Active");
        let quiet = Cohort::new(CohortId::new(), "Quiet");
        let mentor = Mentor::new(MentorId::new(), "ada")
            .with_cohort(active.id)
            .with_cohort(quiet.id);
        let inside = run_time() - Duration::days(1);

        let mut repo = MockPlatformRepository::new();
        let cohorts = vec![active.clone(), quiet.clone()];
        repo.expect_cohorts().returning(move || Ok(cohorts.clone()));
        let mentors = vec![mentor.clone()];
        repo.expect_active_mentors()
            .returning(move |_| Ok(mentors.clone()));
        repo.expect_activity_events_since().returning(|_| Ok(vec![]));
        repo.expect_items_with_activity_before()
            .returning(|_| Ok(std::collections::HashSet::new()));
        repo.expect_work_items_by_id().returning(|_| Ok(vec![]));
        repo.expect_review_events_since().returning(|_| Ok(vec![]));
        let personal = vec![
            ReviewEvent::new(mentor.id, WorkItemId::new(), active.id, inside),
            ReviewEvent::new(mentor.id, WorkItemId::new(), active.id, inside),
        ];
        repo.expect_review_events_by_mentor_since()
            .returning(move |_, _| Ok(personal.clone()));
        repo.expect_items_mentored_since().returning(|_| Ok(vec![]));
        repo.expect_review_events_for_items()
            .returning(|_| Ok(vec![]));
        repo.expect_backlog_items().returning(|| Ok(vec![]));

        let mut log = MockNotificationLogPort::new();
        log.expect_last_heartbeat().returning(|_| Ok(None));
        log.expect_record_heartbeat().returning(|_, _| Ok(()));

        let active_id = active.id;
        let quiet_id = quiet.id;
        let mut notifier = MockNotificationPort::new();
        notifier
            .expect_send_digest()
            .withf(move |_, _, payload, _| {
                payload.cohorts[&active_id].reviewed_by_you == 2
                    && payload.cohorts[&quiet_id].reviewed_by_you == 0
            })
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(notifier),
            Arc::new(log),
            DigestServiceConfig::default(),
        );
        let report = service.run(run_time()).await.unwrap();
        assert_eq!(report.sent, 1);
    }

    #[tokio::test]
    async fn invalid_window_aborts_before_any_mentor() {
        let mut repo = MockPlatformRepository::new();
        repo.expect_active_mentors().times(0);

        let log = MockNotificationLogPort::new();
        let notifier = MockNotificationPort::new();

        let config = DigestServiceConfig {
            stats_period_days: 0,
            ..DigestServiceConfig::default()
        };
        let service =
            DigestService::new(Arc::new(repo), Arc::new(notifier), Arc::new(log), config);
        let result = service.run(run_time()).await;

        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[tokio::test]
    async fn out_of_range_day_counts_are_configuration_errors() {
        let repo = MockPlatformRepository::new();
        // Construction must not panic on an unrepresentable interval.
        let config = DigestServiceConfig {
            stats_period_days: i64::MAX,
            active_lookback_days: i64::MAX,
            throttle_days: i64::MAX,
            ..DigestServiceConfig::default()
        };
        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(MockNotificationPort::new()),
            Arc::new(MockNotificationLogPort::new()),
            config,
        );
        let result = service.run(run_time()).await;
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[tokio::test]
    async fn non_positive_throttle_is_a_configuration_error() {
        let repo = MockPlatformRepository::new();
        let config = DigestServiceConfig {
            throttle_days: 0,
            ..DigestServiceConfig::default()
        };
        let service = DigestService::new(
            Arc::new(repo),
            Arc::new(MockNotificationPort::new()),
            Arc::new(MockNotificationLogPort::new()),
            config,
        );
        let result = service.run(run_time()).await;
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }
}
