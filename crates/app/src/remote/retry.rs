//! Bounded retry for remote reads.

use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::remote::RemoteError;

/// Attempts made for a read before giving up.
pub const DEFAULT_READ_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled for each further retry.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(200);

/// Exponential backoff retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves as one.
    pub attempts: u32,

    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_READ_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay after the `retry`-th failure, counting from zero.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2_u32.saturating_pow(retry))
    }

    /// Run `operation`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// error that is not transient.
    pub async fn run<T, F, Fut>(&self, name: &str, mut operation: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < attempts && error.is_transient() => {
                    let delay = self.backoff(attempt - 1);

                    warn!(operation = name, attempt, ?delay, %error, "retrying remote read");

                    sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    fn unavailable() -> RemoteError {
        RemoteError::from_response(503, "unavailable")
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff(0), Duration::from_millis(200));
        assert_eq!(policy.backoff(1), Duration::from_millis(400));
        assert_eq!(policy.backoff(2), Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_with_backoff() -> Result<(), RemoteError> {
        let calls = &AtomicU32::new(0);
        let started = Instant::now();

        let value = RetryPolicy::default()
            .run("test", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(unavailable())
                } else {
                    Ok(7)
                }
            })
            .await?;

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(600));

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn attempts_are_bounded() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), RemoteError> = RetryPolicy::default()
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(unavailable())
            })
            .await;

        assert!(result.is_err(), "expected the last error, got {result:?}");
        assert_eq!(calls.load(Ordering::SeqCst), DEFAULT_READ_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_failures_are_not_retried() {
        let calls = &AtomicU32::new(0);

        let result: Result<(), RemoteError> = RetryPolicy::default()
            .run("test", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(RemoteError::from_response(401, "unauthorized"))
            })
            .await;

        assert!(
            matches!(result, Err(RemoteError::Api { status: 401, .. })),
            "expected 401, got {result:?}"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
