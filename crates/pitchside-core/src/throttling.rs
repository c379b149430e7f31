use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::clock::Clock;

/// Sliding-window limiter owned by a single transport client.
///
/// Holds the timestamps of calls made within the last `period`. When the
/// window is full the caller is suspended until the oldest call ages out.
/// There is no internal locking: one client, one caller at a time.
pub struct RateLimiter {
    max_requests: usize,
    period: Duration,
    window: VecDeque<Instant>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, period: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_requests: max_requests.max(1) as usize,
            period,
            window: VecDeque::new(),
            clock,
        }
    }

    /// Waits for window capacity if necessary, then records the call.
    pub async fn wait_if_needed(&mut self) {
        let now = self.clock.now();
        self.prune(now);

        if self.window.len() >= self.max_requests {
            if let Some(oldest) = self.window.front().copied() {
                let wait = self.period.saturating_sub(now.duration_since(oldest));
                if !wait.is_zero() {
                    warn!(
                        wait_secs = wait.as_secs_f64(),
                        max_requests = self.max_requests,
                        "rate limit reached, waiting"
                    );
                    self.clock.sleep(wait).await;
                }
            }
            let resumed = self.clock.now();
            self.prune(resumed);
        }

        self.window.push_back(self.clock.now());
    }

    /// Number of calls currently counted against the window.
    pub fn in_window(&self) -> usize {
        self.window.len()
    }

    fn prune(&mut self, now: Instant) {
        while let Some(oldest) = self.window.front() {
            if now.duration_since(*oldest) < self.period {
                break;
            }
            self.window.pop_front();
        }
    }
}
