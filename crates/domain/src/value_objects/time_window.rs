//! Rolling statistics window
//!
//! One `TimeWindow` value is built per digest run and threaded through every
//! aggregation, so site totals and per-cohort totals are guaranteed to be
//! computed against identical bounds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Default rolling statistics period
pub const DEFAULT_STATS_PERIOD_DAYS: i64 = 7;

/// Default lookback used to decide whether a mentor counts as active
pub const DEFAULT_ACTIVE_LOOKBACK_DAYS: i64 = 21;

/// The rolling statistics period `[stats_start, now)` plus the longer
/// activity lookback `[active_start, now)`
///
/// The reference instant is truncated to whole seconds on construction so
/// every comparison in a run happens at the same granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    now: DateTime<Utc>,
    stats_start: DateTime<Utc>,
    active_start: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window ending at `now` with explicit periods
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeWindow` when either period is not
    /// strictly positive or the activity lookback is shorter than the stats
    /// period.
    pub fn new(
        now: DateTime<Utc>,
        stats_period: Duration,
        active_lookback: Duration,
    ) -> Result<Self, DomainError> {
        if stats_period <= Duration::zero() {
            return Err(DomainError::InvalidTimeWindow(
                "stats period must be positive".to_string(),
            ));
        }
        if active_lookback < stats_period {
            return Err(DomainError::InvalidTimeWindow(format!(
                "active lookback ({active_lookback}) shorter than stats period ({stats_period})"
            )));
        }

        let now = DateTime::from_timestamp(now.timestamp(), 0).ok_or_else(|| {
            DomainError::InvalidTimeWindow(format!("reference instant out of range: {now}"))
        })?;

        Ok(Self {
            now,
            stats_start: now - stats_period,
            active_start: now - active_lookback,
        })
    }

    /// Build a window with the standard 7-day stats period and 21-day
    /// activity lookback
    pub fn standard(now: DateTime<Utc>) -> Result<Self, DomainError> {
        Self::new(
            now,
            Duration::days(DEFAULT_STATS_PERIOD_DAYS),
            Duration::days(DEFAULT_ACTIVE_LOOKBACK_DAYS),
        )
    }

    /// The reference instant of the run, truncated to whole seconds
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Start of the rolling statistics period
    pub const fn stats_start(&self) -> DateTime<Utc> {
        self.stats_start
    }

    /// Start of the mentor-activeness lookback
    pub const fn active_start(&self) -> DateTime<Utc> {
        self.active_start
    }

    /// Whether `t` falls inside the statistics period `[stats_start, now)`
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.stats_start && t < self.now
    }
}
