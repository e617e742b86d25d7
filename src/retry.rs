//! Retry logic with exponential backoff for calls to the AI endpoint.

use std::future::Future;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::{debug, warn};

/// Maximum number of attempts for one AI request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Backoff before the first retry, in milliseconds. Doubles after every
/// failed attempt.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Attempt count and backoff schedule for one request.
///
/// The schedule starts at `initial_backoff` and doubles after every failed
/// attempt, with no jitter and no upper cap.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(INITIAL_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// Returns the delay to wait after `failed_attempts` attempts have failed:
    /// `initial_backoff * 2^(failed_attempts - 1)`.
    pub fn backoff_after(&self, failed_attempts: u32) -> Duration {
        self.initial_backoff * 2u32.pow(failed_attempts.saturating_sub(1))
    }
}

/// All attempts failed; carries the attempt count and the last error seen.
#[derive(Debug)]
pub struct AiConnectivityError {
    pub attempts: u32,
    pub last_error: anyhow::Error,
}

impl std::fmt::Display for AiConnectivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AI connectivity failed after {} attempts: {}",
            self.attempts, self.last_error
        )
    }
}

impl std::error::Error for AiConnectivityError {}

/// Executes an async operation with retry logic, sleeping with
/// `tokio::time::sleep` between attempts.
///
/// Every error counts as a failed attempt; transport failures and non-success
/// statuses are deliberately not distinguished. A successful attempt returns
/// immediately. Exhaustion surfaces as [`AiConnectivityError`].
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    with_retry_using(policy, operation_name, operation, tokio::time::sleep).await
}

/// Same as [`with_retry`] but with an injected sleep function, decoupling the
/// backoff schedule from real time.
pub async fn with_retry_using<F, Fut, T, S, SFut>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
    sleep: S,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if attempt < policy.max_attempts {
                    let delay = policy.backoff_after(attempt);
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                        operation_name,
                        attempt,
                        policy.max_attempts,
                        e,
                        delay.as_millis()
                    );
                    sleep(delay).await;
                } else {
                    debug!(
                        "{}: attempt {}/{} failed ({}), giving up",
                        operation_name, attempt, policy.max_attempts, e
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(AiConnectivityError {
        attempts: policy.max_attempts,
        last_error: last_error
            .unwrap_or_else(|| anyhow!("{}: no attempts were allowed", operation_name)),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Sleep function that records requested delays instead of waiting.
    fn recording_sleep(
        delays: Arc<Mutex<Vec<Duration>>>,
    ) -> impl Fn(Duration) -> std::future::Ready<()> {
        move |d| {
            delays.lock().unwrap().push(d);
            std::future::ready(())
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.initial_backoff, Duration::from_millis(1000));
    }

    #[test]
    fn test_backoff_schedule_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_after(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(2000));
        assert_eq!(policy.backoff_after(3), Duration::from_millis(4000));
        assert_eq!(policy.backoff_after(4), Duration::from_millis(8000));
    }

    #[test]
    fn test_connectivity_error_display() {
        let err = AiConnectivityError {
            attempts: 5,
            last_error: anyhow!("connection refused"),
        };
        assert!(err.to_string().contains("after 5 attempts"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_makes_one_call_and_no_sleeps() {
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_retry_using(
            &RetryPolicy::default(),
            "test",
            || {
                let calls = Arc::clone(&calls_clone);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, anyhow::Error>(42)
                }
            },
            recording_sleep(Arc::clone(&delays)),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(delays.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_failures_then_success() {
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_retry_using(
            &RetryPolicy::default(),
            "test",
            || {
                let calls = Arc::clone(&calls_clone);
                async move {
                    let count = calls.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err(anyhow!("connection reset"))
                    } else {
                        Ok("answer")
                    }
                }
            },
            recording_sleep(Arc::clone(&delays)),
        )
        .await;

        assert_eq!(result.unwrap(), "answer");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            *delays.lock().unwrap(),
            vec![Duration::from_millis(1000), Duration::from_millis(2000)]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_makes_max_attempts_calls_with_doubling_delays() {
        let delays = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_retry_using(
            &RetryPolicy::default(),
            "test",
            || {
                let calls = Arc::clone(&calls_clone);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(anyhow!("service unavailable"))
                }
            },
            recording_sleep(Arc::clone(&delays)),
        )
        .await;

        let err = result.unwrap_err();
        let connectivity = err
            .downcast_ref::<AiConnectivityError>()
            .expect("exhaustion should surface as AiConnectivityError");
        assert_eq!(connectivity.attempts, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        // No delay after the final attempt.
        assert_eq!(
            *delays.lock().unwrap(),
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
                Duration::from_millis(8000),
            ]
        );
    }

    #[tokio::test]
    async fn test_with_retry_success_uses_real_sleep_path() {
        let result = with_retry(&RetryPolicy::default(), "test", || async {
            Ok::<_, anyhow::Error>("ok")
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
    }
}
