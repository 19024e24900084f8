//! Exponential backoff for transient extraction failures.

use std::time::{Duration, SystemTime};

use reqwest_retry::{RetryDecision, RetryPolicy};

const MAX_DELAY: Duration = Duration::from_secs(30);

/// Bounded retry schedule: `base * 2^attempt`, capped at 30 seconds.
///
/// Plugged into `RetryTransientMiddleware`, which decides what counts as
/// transient; this only decides how long to wait and when to stop.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Backoff {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before retry number `attempt` (0-based), or `None` once the
    /// budget is spent.
    pub fn delay(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_retries {
            return None;
        }
        let delay = self.base_delay.as_secs_f64() * 2_f64.powi(attempt as i32);
        Some(Duration::from_secs_f64(delay.min(MAX_DELAY.as_secs_f64())))
    }
}

impl RetryPolicy for Backoff {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        match self.delay(n_past_retries) {
            Some(delay) => {
                tracing::warn!(
                    attempt = n_past_retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Transient extraction failure, retrying"
                );
                RetryDecision::Retry {
                    execute_after: SystemTime::now() + delay,
                }
            }
            None => RetryDecision::DoNotRetry,
        }
    }
}
