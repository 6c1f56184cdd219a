//! Retry schedule for failed API calls.
//!
//! The client performs no retries itself; a caller owning the attempt loop
//! consults [`crate::ApiError::is_retryable`] and this schedule.

use rand::Rng as _;
use std::time::Duration;

/// Exponential backoff with uniform jitter.
///
/// The delay for a 0-indexed `attempt` is
/// `min(base * 2^attempt, max) + uniform(0, jitter * capped)`.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub base: Duration,
    pub max: Duration,
    /// Upper bound of the jitter, as a fraction of the capped delay.
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    /// 1 s doubling per attempt, capped at 16 s, with up to 10% jitter.
    fn default() -> Self {
        Self {
            base: Duration::from_millis(1000),
            max: Duration::from_millis(16_000),
            jitter: 0.1,
        }
    }
}

impl BackoffPolicy {
    /// Delay to sleep before retrying the given 0-indexed attempt.
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = u64::try_from(self.base.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);

        let exp = 2u64.saturating_pow(attempt.min(30));
        let capped = base_ms.saturating_mul(exp).min(max_ms);

        // gen_range panics on an empty range, so a zero delay takes no jitter.
        let jitter_ms = if self.jitter > 0.0 && capped > 0 {
            let bound = self.jitter * capped as f64;
            rand::thread_rng().gen_range(0.0..bound)
        } else {
            0.0
        };

        Duration::from_millis(capped.saturating_add(jitter_ms as u64))
    }
}

/// Delay under the default policy.
#[must_use]
pub fn retry_delay(attempt: u32) -> Duration {
    BackoffPolicy::default().delay(attempt)
}
