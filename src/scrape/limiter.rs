//! Rate limiter for spacing out requests to the remote host
//!
//! Politeness is a property of the remote host, not of any single
//! caller: with one URL in flight at a time, a single limiter gating
//! the loop is equivalent to a global budget. The delay is drawn
//! uniformly from a configured interval so the request cadence never
//! settles into a fixed, fingerprint-able rhythm.

use rand::Rng;
use std::time::Duration;

/// Enforces a randomized minimum delay between outbound requests
#[derive(Debug, Clone)]
pub struct RateLimiter {
    min: Duration,
    max: Duration,
}

impl RateLimiter {
    /// Creates a limiter drawing delays from `[min, max]`
    ///
    /// Callers must ensure `min <= max` (config validation does); equal
    /// bounds degenerate to a fixed delay.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Draws the next delay from the configured interval
    ///
    /// Pure given the RNG, which is the test seam: tests pass a seeded
    /// RNG and assert on bounds without real wall-clock waits.
    pub fn next_delay(&self, rng: &mut impl Rng) -> Duration {
        if self.min >= self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    /// Suspends the caller for the next drawn delay
    ///
    /// No return value and no failure mode; the only effect is the
    /// wall-clock wait.
    pub async fn wait(&self) {
        let delay = self.next_delay(&mut rand::thread_rng());
        tracing::debug!("Rate limiter waiting {:?} before next request", delay);
        tokio::time::sleep(delay).await;
    }
}
