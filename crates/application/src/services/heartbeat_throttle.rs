//! Heartbeat throttle
//!
//! Decides, per mentor, whether enough time has elapsed since their last
//! digest to send another. The notification log is a three-state read: never
//! sent (first digest, gets the introduction), sent long enough ago (send),
//! sent recently (skip). Both timestamps are truncated to whole seconds so
//! the cron cadence and the threshold cannot flap against each other by a
//! few hundred milliseconds.

use chrono::{DateTime, Duration, Utc};

/// Default minimum interval between two digests to the same mentor
pub const DEFAULT_THROTTLE_DAYS: i64 = 6;

/// The throttle's verdict for one mentor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartbeatDecision {
    /// Never notified before; send with the one-time introduction
    FirstDigest,
    /// Enough time has elapsed; send
    Send,
    /// Notified too recently; skip this run
    Skip,
}

impl HeartbeatDecision {
    /// Whether this decision results in a dispatch attempt
    pub const fn should_send(self) -> bool {
        !matches!(self, Self::Skip)
    }

    /// Whether this would be the mentor's first-ever digest
    pub const fn is_first(self) -> bool {
        matches!(self, Self::FirstDigest)
    }
}

/// Throttling decision function over the per-mentor notification log
#[derive(Debug, Clone, Copy)]
pub struct HeartbeatThrottle {
    min_interval: Duration,
}

impl HeartbeatThrottle {
    /// Create a throttle with an explicit minimum interval
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    /// Evaluate the throttle for one mentor
    ///
    /// The boundary is inclusive: exactly `min_interval` elapsed sends.
    pub fn evaluate(
        &self,
        last_sent: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> HeartbeatDecision {
        match last_sent {
            None => HeartbeatDecision::FirstDigest,
            Some(last) => {
                let elapsed_secs = now.timestamp() - last.timestamp();
                if elapsed_secs >= self.min_interval.num_seconds() {
                    HeartbeatDecision::Send
                } else {
                    HeartbeatDecision::Skip
                }
            },
        }
    }
}

impl Default for HeartbeatThrottle {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_THROTTLE_DAYS))
    }
}
