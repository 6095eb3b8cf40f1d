//! Session expiry policy
//!
//! Pure decisions over timestamps: whether a session is still inside its
//! inactivity timeout, and whether it is young enough that expiry and
//! authorization checks should be skipped. Nothing here touches storage.

use std::time::Duration;

/// Inactivity timeout after which a session is expired
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Window after login during which request-level checks are suppressed
pub const REQUEST_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Interval of the background expiry sweep
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(2 * 60);

/// Window after login during which the background sweep stays quiet
pub const SWEEP_GRACE_PERIOD: Duration = Duration::from_secs(5);

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// `now - login_time < timeout`; false when `login_time` is absent
pub fn is_valid(login_time: Option<i64>, now: i64, timeout: Duration) -> bool {
    match login_time {
        Some(login_time) => now.saturating_sub(login_time) < millis(timeout),
        None => false,
    }
}

/// `now - login_time <= grace`; false when `login_time` is absent
pub fn is_within_grace_period(login_time: Option<i64>, now: i64, grace: Duration) -> bool {
    match login_time {
        Some(login_time) => now.saturating_sub(login_time) <= millis(grace),
        None => false,
    }
}

/// Timeout and grace pair applied by one observer of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    pub timeout: Duration,
    pub grace: Duration,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::request()
    }
}

impl SessionPolicy {
    pub const fn new(timeout: Duration, grace: Duration) -> Self {
        Self { timeout, grace }
    }

    /// Policy used by the access guard and the request gateway
    pub const fn request() -> Self {
        Self::new(SESSION_TIMEOUT, REQUEST_GRACE_PERIOD)
    }

    /// Policy used by the periodic background sweep
    pub const fn sweep() -> Self {
        Self::new(SESSION_TIMEOUT, SWEEP_GRACE_PERIOD)
    }

    pub fn is_valid(&self, login_time: Option<i64>, now: i64) -> bool {
        is_valid(login_time, now, self.timeout)
    }

    pub fn is_within_grace_period(&self, login_time: Option<i64>, now: i64) -> bool {
        is_within_grace_period(login_time, now, self.grace)
    }

    /// Outside the grace window and past the timeout
    pub fn is_expired(&self, login_time: Option<i64>, now: i64) -> bool {
        !self.is_within_grace_period(login_time, now) && !self.is_valid(login_time, now)
    }
}
