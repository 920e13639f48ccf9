//! Rate-limit retry policy.
//!
//! ABAX signals rate limiting with HTTP 429 and an optional
//! `X-Rate-Limit-Reset` header holding the instant the window clears. The
//! client waits until that instant (or the start of the next whole minute
//! when the header is missing) and tries again, up to a fixed attempt budget.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Default number of HTTP attempts for one logical call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Configuration for rate-limit retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of HTTP attempts allowed per logical call, including the first.
    pub max_attempts: u32,
    /// Upper bound on a single rate-limit wait. `None` waits as long as the API asks.
    pub max_reset_wait: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_reset_wait: None,
        }
    }
}

impl RetryConfig {
    /// Set the total number of attempts. Values below 1 are treated as 1.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Cap every rate-limit wait at `wait`.
    pub fn with_max_reset_wait(mut self, wait: Duration) -> Self {
        self.max_reset_wait = Some(wait);
        self
    }

    /// A single attempt; a 429 fails the call straight away.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Per-call retry bookkeeping. Created at the start of a logical call and
/// dropped when it resolves.
#[derive(Debug, Clone)]
pub struct RetryState {
    attempt: u32,
    max_attempts: u32,
    max_reset_wait: Option<Duration>,
}

impl RetryState {
    /// Create a fresh retry state from config.
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_attempts: config.max_attempts.max(1),
            max_reset_wait: config.max_reset_wait,
        }
    }

    /// Returns the current attempt index (0-based).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns the total attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns true if the current attempt is the last one allowed.
    pub fn is_last_attempt(&self) -> bool {
        self.attempt + 1 >= self.max_attempts
    }

    /// Record a rate-limited attempt and return how long to wait before the
    /// next one. Returns `None` when the current attempt was the last allowed.
    pub fn next_wait(
        &mut self,
        reset_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        if self.is_last_attempt() {
            return None;
        }

        let reset_at = reset_at.unwrap_or_else(|| start_of_next_minute(now));
        let mut wait = wait_until(reset_at, now);
        if let Some(cap) = self.max_reset_wait {
            wait = wait.min(cap);
        }

        self.attempt += 1;
        Some(wait)
    }
}

/// The first instant of the whole minute following `now`.
pub fn start_of_next_minute(now: DateTime<Utc>) -> DateTime<Utc> {
    let next = (now.timestamp().div_euclid(60) + 1) * 60;
    DateTime::from_timestamp(next, 0).unwrap_or(now)
}

/// `max(0, reset_at - now)` as a std duration.
pub fn wait_until(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (reset_at - now).to_std().unwrap_or(Duration::ZERO)
}
