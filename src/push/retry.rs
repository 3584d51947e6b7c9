//! Bounded backoff retry for temporary failures.

use std::future::Future;
use std::time::Duration;

use super::Temporary;
use crate::time::Sleeper;

/// Backoff bounds for [`retry`].
///
/// The delay before retry number `n` (1-based) is `min_backoff * n²`. Once
/// that delay would exceed `max_backoff`, retrying stops regardless of the
/// caller's attempt budget.
///
/// The unit is never zero, so the ceiling always bounds the number of
/// attempts: a zero unit passed to [`with_min_backoff`](Self::with_min_backoff)
/// is raised to [`MIN_BACKOFF_FLOOR`](Self::MIN_BACKOFF_FLOOR).
///
/// # Defaults
///
/// - `min_backoff`: 100 milliseconds
/// - `max_backoff`: 60 seconds
///
/// # Example
///
/// ```
/// use hcm_push::push::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_min_backoff(Duration::from_millis(200))
///     .with_max_backoff(Duration::from_secs(10));
///
/// assert_eq!(policy.backoff(3), Duration::from_millis(1800));
/// assert_eq!(policy.max_backoff(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    min_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Default delay unit (100 milliseconds).
    pub const DEFAULT_MIN_BACKOFF: Duration = Duration::from_millis(100);

    /// Default ceiling (60 seconds).
    pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

    /// Smallest accepted delay unit (1 nanosecond).
    pub const MIN_BACKOFF_FLOOR: Duration = Duration::from_nanos(1);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_backoff: Self::DEFAULT_MIN_BACKOFF,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
        }
    }

    /// Sets the delay unit; zero is raised to [`Self::MIN_BACKOFF_FLOOR`].
    #[must_use]
    pub const fn with_min_backoff(mut self, delay: Duration) -> Self {
        self.min_backoff = if delay.is_zero() {
            Self::MIN_BACKOFF_FLOOR
        } else {
            delay
        };
        self
    }

    /// Sets the ceiling.
    #[must_use]
    pub const fn with_max_backoff(mut self, delay: Duration) -> Self {
        self.max_backoff = delay;
        self
    }

    /// Returns the delay unit; the first retry waits exactly this long.
    #[must_use]
    pub const fn min_backoff(&self) -> Duration {
        self.min_backoff
    }

    /// Returns the ceiling; a computed delay above it ends the retry sequence.
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Computes the delay before retry number `attempt` (1 = first retry).
    ///
    /// Saturates at [`Duration::MAX`] instead of overflowing.
    #[must_use]
    pub const fn backoff(&self, attempt: u32) -> Duration {
        self.min_backoff.saturating_mul(attempt.saturating_mul(attempt))
    }

    /// Returns the delay to wait before retry number `attempt`, or `None`
    /// if the sequence must stop.
    ///
    /// Stops when `attempt` exceeds `retry_attempts` or the delay exceeds
    /// `max_backoff`.
    #[must_use]
    pub fn next_delay(&self, attempt: u32, retry_attempts: u32) -> Option<Duration> {
        let delay = self.backoff(attempt);
        if attempt > retry_attempts || delay > self.max_backoff {
            return None;
        }
        Some(delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `operation` until it succeeds, fails permanently, or runs out of budget.
///
/// A failure whose [`Temporary::is_temporary`] is false is returned at once.
/// Temporary failures are retried after [`RetryPolicy::next_delay`]; when that
/// returns `None` the last error is returned as-is. The operation is invoked
/// at most `retry_attempts + 1` times.
///
/// Dropping the returned future abandons the sequence, including any pending
/// sleep.
///
/// # Errors
///
/// Returns the first non-temporary error, or the last temporary error once
/// the budget or the backoff ceiling is exhausted.
pub async fn retry<T, E, F, Fut, S>(
    policy: &RetryPolicy,
    retry_attempts: u32,
    sleeper: &S,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Temporary + std::fmt::Display,
    S: Sleeper,
{
    let mut attempt: u32 = 0;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_temporary() {
            return Err(err);
        }

        attempt = attempt.saturating_add(1);
        let Some(delay) = policy.next_delay(attempt, retry_attempts) else {
            tracing::warn!("Giving up after {attempt} attempt(s): {err}");
            return Err(err);
        };

        tracing::warn!(
            "Temporary failure on attempt {attempt}, retrying in {}ms: {err}",
            delay.as_millis()
        );
        sleeper.sleep(delay).await;
    }
}
