//! Retry policy with unjittered exponential backoff.

use std::time::Duration;

/// Exponential backoff: `base * factor^attempt`, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    pub base: Duration,
    pub factor: f64,
    pub max: Option<Duration>,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: None,
        }
    }
}

impl Backoff {
    /// Delay to wait after the failed attempt numbered `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        let scale = self.factor.powi(attempt.min(i32::MAX as u32) as i32);
        let mut seconds = self.base.as_secs_f64() * scale;
        if let Some(max) = self.max {
            seconds = seconds.min(max.as_secs_f64());
        }

        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }
}

/// How many times a transport call is attempted and how long to wait between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential(3)
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::default(),
        }
    }

    pub fn no_retry() -> Self {
        Self::exponential(1)
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}
