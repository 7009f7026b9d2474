//! Retry policy for read requests.

use std::time::Duration;

/// How many times a failed read is retried, and how long to wait between
/// attempts.
///
/// This is an explicit policy object so tests can substitute deterministic
/// values. It applies to reads only; mutations are never retried because a
/// duplicate write is not safe to issue blindly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before each retry.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy.
    #[must_use]
    pub const fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total number of attempts including the first.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    /// One retry with a short fixed backoff.
    fn default() -> Self {
        Self::new(1, Duration::from_millis(500))
    }
}
