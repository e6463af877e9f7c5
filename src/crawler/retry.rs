//! Bounded retry policy for fetches
//!
//! The policy owns everything about retrying: how many attempts, how long each
//! attempt may take, how long to wait in between, and which failures are worth
//! another attempt. The traversal code never loops on failures itself.

use crate::config::FetchConfig;
use crate::crawler::fetcher::FetchError;
use std::future::Future;
use std::time::Duration;

/// Decides whether a failed attempt should be retried
pub type RetryPredicate = fn(&FetchError) -> bool;

/// Retry settings applied around a single fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Timeout applied to every attempt independently
    pub per_attempt_timeout: Duration,

    /// Delay before the first retry; doubled for each further retry
    pub base_delay: Duration,

    /// Upper bound on the delay between attempts
    pub max_delay: Duration,

    /// Which failures are retried; everything else is returned immediately
    pub retryable: RetryPredicate,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

impl RetryPolicy {
    /// Builds a policy from the `[fetch]` configuration section
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            per_attempt_timeout: Duration::from_millis(config.timeout_ms),
            base_delay: Duration::from_millis(config.retry_delay_ms),
            max_delay: Duration::from_millis(config.max_retry_delay_ms),
            retryable: FetchError::is_transient,
        }
    }

    /// Delay to wait after the given (1-based) failed attempt
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_search::crawler::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy {
    ///     base_delay: Duration::from_millis(100),
    ///     max_delay: Duration::from_millis(500),
    ///     ..RetryPolicy::default()
    /// };
    /// assert_eq!(policy.delay_after(1), Duration::from_millis(100));
    /// assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    /// assert_eq!(policy.delay_after(4), Duration::from_millis(500));
    /// ```
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails permanently, or runs out of attempts
    ///
    /// Each call to `operation` receives the 1-based attempt number and is
    /// cut off after `per_attempt_timeout`, which counts as a
    /// [`FetchError::Timeout`]. When every attempt fails with a retryable error
    /// the last error is wrapped in [`FetchError::Exhausted`].
    pub async fn run<T, F, Fut>(&self, address: &str, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;

        loop {
            let outcome = match tokio::time::timeout(self.per_attempt_timeout, operation(attempt))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(FetchError::Timeout {
                    url: address.to_string(),
                    timeout: self.per_attempt_timeout,
                }),
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !(self.retryable)(&error) {
                return Err(error);
            }

            if attempt >= self.max_attempts {
                return Err(FetchError::Exhausted {
                    url: address.to_string(),
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            tracing::debug!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                self.max_attempts,
                address,
                error
            );

            let delay = self.delay_after(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            per_attempt_timeout: Duration::from_millis(50),
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            retryable: FetchError::is_transient,
        }
    }

    fn protocol_error() -> FetchError {
        FetchError::Protocol {
            url: "https://www.utk.edu/".to_string(),
            reason: "connection reset".to_string(),
        }
    }

    #[test]
    fn test_default_policy_matches_fetch_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.per_attempt_timeout, Duration::from_secs(10));
        assert_eq!(policy.delay_after(1), Duration::ZERO);
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(1),
            ..quick_policy(10)
        };
        assert_eq!(policy.delay_after(1), Duration::from_millis(250));
        assert_eq!(policy.delay_after(2), Duration::from_millis(500));
        assert_eq!(policy.delay_after(3), Duration::from_secs(1));
        assert_eq!(policy.delay_after(40), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = quick_policy(5)
            .run("https://www.utk.edu/", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(protocol_error())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = quick_policy(4)
            .run("https://www.utk.edu/", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(protocol_error()) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result {
            Err(FetchError::Exhausted { attempts, last, .. }) => {
                assert_eq!(attempts, 4);
                assert!(matches!(*last, FetchError::Protocol { .. }));
            }
            other => panic!("expected exhausted error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_transient_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = quick_policy(10)
            .run("https://www.utk.edu/missing", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(FetchError::Status {
                        url: "https://www.utk.edu/missing".to_string(),
                        status: 404,
                    })
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_slow_attempts_time_out_independently() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = quick_policy(3)
            .run("https://www.utk.edu/slow", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(FetchError::Exhausted { attempts, last, .. }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, FetchError::Timeout { .. }));
            }
            other => panic!("expected exhausted error, got {:?}", other),
        }
    }
}
