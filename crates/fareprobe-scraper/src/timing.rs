//! Randomized waits: pacing jitter and retry backoff.
//!
//! Every wait is drawn independently per worker; there is no shared rate
//! limiter. Sampling happens before the `await`, so no RNG handle is held
//! across a suspension point.

use std::time::Duration;

/// Cap on the backoff multiplier so extreme configs cannot overflow.
const MAX_BACKOFF_FACTOR: f64 = 3_600.0;

/// Uniform random delay in `[min, max)`. Collapses to `min` when the range
/// is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter {
    pub min: Duration,
    pub max: Duration,
}

impl Jitter {
    pub const NONE: Jitter = Jitter {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Negative or NaN bounds become zero; bounds too large for a
    /// `Duration` saturate to `Duration::MAX`.
    #[must_use]
    pub fn from_secs_f64(min: f64, max: f64) -> Self {
        Self::new(saturating_secs(min), saturating_secs(max))
    }

    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let span = self.max - self.min;
        let offset = Duration::try_from_secs_f64(span.as_secs_f64() * rand::random::<f64>())
            .map_or(span, |offset| offset.min(span));
        self.min.saturating_add(offset)
    }

    /// Sleep for a freshly sampled delay. Returns the delay slept.
    pub async fn sleep(&self) -> Duration {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

fn saturating_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

/// Bounded retries with randomized exponential backoff.
///
/// After failed attempt `n` (zero-based) the wait is drawn from
/// `[1, backoff_base^n)` multiples of `backoff_unit`:
///
/// | Failed attempt | Wait (base 2, unit 1 s) |
/// |----------------|-------------------------|
/// | 0              | 1 s                     |
/// | 1              | 1 s .. 2 s              |
/// | 2              | none, attempts exhausted |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub backoff_base: f64,
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: 2.0,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait to insert after the failed zero-based `attempt`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let ceiling = self.backoff_base.powi(exponent).min(MAX_BACKOFF_FACTOR);
        let factor = if ceiling > 1.0 {
            1.0 + (ceiling - 1.0) * rand::random::<f64>()
        } else {
            1.0
        };
        self.backoff_unit.mul_f64(factor)
    }
}
