//! Retry controller for the eventual consistency window
//!
//! Every remote call the reconciler issues goes through [`with_backoff`];
//! nothing else in the workspace retries. An operation's remote call count
//! therefore always equals its attempt count, which keeps mutation counting
//! in tests and logs honest.

use atlasflow_api::{ApiError, ApiResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Backoff schedule for one lifecycle operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub initial_delay: Duration,

    /// Upper bound on the delay between attempts
    pub max_delay: Duration,

    /// Exponential multiplier applied per attempt
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Schedule without sleeping, for tests and hosts that pace themselves.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Delay after attempt `attempt` (zero-based), exponential and capped.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let millis = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis(millis as u64).min(self.max_delay)
    }
}

/// Retry predicate for mutating calls and plain reads: transient control
/// plane trouble is worth another attempt, everything else is not.
pub fn on_transient(error: &ApiError) -> bool {
    error.is_transient()
}

/// Retry predicate for reads that follow a mutation: inside the consistency
/// window `NotFound` usually means the write is not visible yet, so it is
/// retried alongside the transient classes.
pub fn on_transient_or_missing(error: &ApiError) -> bool {
    matches!(error, ApiError::NotFound(_)) || error.is_transient()
}

/// Why a retried call ultimately failed.
#[derive(Debug)]
pub enum RetryError {
    /// The predicate declined to retry; the error is permanent as far as
    /// this call site is concerned.
    Permanent(ApiError),

    /// Every attempt failed with a retryable error.
    Exhausted { attempts: u32, last: ApiError },

    /// The cancellation token fired.
    Cancelled,
}

/// Run `op` until it succeeds, the predicate stops it, the attempt budget
/// runs out, or the token is cancelled.
///
/// Cancellation is observed before each attempt and during the backoff
/// sleep: an in-flight call runs to completion, and no further call starts
/// afterwards.
pub async fn with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    should_retry: fn(&ApiError) -> bool,
    mut op: F,
) -> std::result::Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled);
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !should_retry(&error) {
                    return Err(RetryError::Permanent(error));
                }

                attempt += 1;
                if attempt >= max_attempts {
                    return Err(RetryError::Exhausted {
                        attempts: max_attempts,
                        last: error,
                    });
                }

                let delay = policy.delay_for_attempt(attempt - 1);
                tracing::debug!(
                    "attempt {}/{} failed, retrying in {:?}: {}",
                    attempt,
                    max_attempts,
                    delay,
                    error
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(RetryError::Cancelled),
                    _ = sleep(delay) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(10000),
            multiplier: 2.0,
        };

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(4000));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(8000));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(10000)); // capped at max
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = with_backoff(
            &RetryPolicy::immediate(5),
            &CancellationToken::new(),
            on_transient,
            move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(ApiError::RateLimited("busy".into()))
                    } else {
                        Ok(42)
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_uses_exact_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: std::result::Result<(), RetryError> = with_backoff(
            &RetryPolicy::immediate(4),
            &CancellationToken::new(),
            on_transient,
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::Conflict("still busy".into()))
                }
            },
        )
        .await;

        match result {
            Err(RetryError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 4);
                assert_eq!(last, ApiError::Conflict("still busy".into()));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_permanent_error_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: std::result::Result<(), RetryError> = with_backoff(
            &RetryPolicy::immediate(5),
            &CancellationToken::new(),
            on_transient,
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::Unauthorized("bad key".into()))
                }
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(RetryError::Permanent(ApiError::Unauthorized(_)))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_not_found_retried_only_after_mutations() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        // Plain read predicate: first NotFound is final.
        let result: std::result::Result<(), RetryError> = with_backoff(
            &RetryPolicy::immediate(5),
            &CancellationToken::new(),
            on_transient,
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::NotFound("no such container".into()))
                }
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(RetryError::Permanent(ApiError::NotFound(_)))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Read-after-write predicate: NotFound is the consistency window.
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result = with_backoff(
            &RetryPolicy::immediate(5),
            &CancellationToken::new(),
            on_transient_or_missing,
            move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                        Err(ApiError::NotFound("not visible yet".into()))
                    } else {
                        Ok("visible")
                    }
                }
            },
        )
        .await;
        assert_eq!(result.unwrap(), "visible");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_cancelled_token_prevents_any_call() {
        let token = CancellationToken::new();
        token.cancel();

        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: std::result::Result<(), RetryError> = with_backoff(
            &RetryPolicy::immediate(5),
            &token,
            on_transient,
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        )
        .await;

        assert!(matches!(result, Err(RetryError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_backoff_stops_further_calls() {
        let token = CancellationToken::new();
        let calls = Arc::new(AtomicU32::new(0));

        let policy = RetryPolicy {
            max_attempts: 5,
            initial_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(60),
            multiplier: 1.0,
        };

        let counter = calls.clone();
        let op_token = token.clone();
        let result: std::result::Result<(), RetryError> = with_backoff(
            &policy,
            &token,
            on_transient,
            move || {
                let counter = counter.clone();
                let op_token = op_token.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    // Cancel from inside the first call; the controller must
                    // notice during the backoff sleep instead of waiting the
                    // full minute or calling again.
                    op_token.cancel();
                    Err(ApiError::RateLimited("busy".into()))
                }
            },
        )
        .await;

        assert!(matches!(result, Err(RetryError::Cancelled)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
