use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Exponential-backoff retry for transient collaborator failures.
///
/// The orchestrator itself never retries; this wrapper is the recommended
/// caller-level policy. A predicate decides which errors are transient —
/// malformed model output is not, and replaying it would just burn quota.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }

    pub async fn retry_if<F, Fut, T, E>(
        &self,
        operation_name: &str,
        mut f: F,
        is_transient: impl Fn(&E) -> bool,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match f().await {
                Ok(result) => {
                    if attempt > 0 {
                        info!(
                            operation = operation_name,
                            attempts = attempt + 1,
                            "Operation succeeded after retries"
                        );
                    }
                    return Ok(result);
                }
                Err(e) if !is_transient(&e) => {
                    warn!(
                        operation = operation_name,
                        error = %e,
                        "Operation failed with non-transient error, not retrying"
                    );
                    return Err(e);
                }
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        warn!(
                            operation = operation_name,
                            attempts = attempt,
                            error = %e,
                            "Operation failed after max retries"
                        );
                        return Err(e);
                    }

                    warn!(
                        operation = operation_name,
                        attempt = attempt,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis(),
                        error = %e,
                        "Operation failed, retrying"
                    );

                    sleep(backoff).await;

                    backoff = std::cmp::min(backoff * 2, self.max_backoff);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Flaky(bool);

    impl std::fmt::Display for Flaky {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "flaky(transient={})", self.0)
        }
    }

    #[tokio::test]
    async fn transient_errors_retry_until_budget_exhausted() {
        let policy = RetryPolicy::new(2, 1, 5);
        let calls = AtomicUsize::new(0);
        let result: Result<(), Flaky> = policy
            .retry_if(
                "always-fails",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(Flaky(true)) }
                },
                |e| e.0,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3, "initial try + 2 retries");
    }

    #[tokio::test]
    async fn non_transient_errors_fail_immediately() {
        let policy = RetryPolicy::new(5, 1, 5);
        let calls = AtomicUsize::new(0);
        let result: Result<(), Flaky> = policy
            .retry_if(
                "malformed",
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Err(Flaky(false)) }
                },
                |e| e.0,
            )
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn eventual_success_is_returned() {
        let policy = RetryPolicy::new(3, 1, 5);
        let calls = AtomicUsize::new(0);
        let result: Result<usize, Flaky> = policy
            .retry_if(
                "flaky",
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { if n < 2 { Err(Flaky(true)) } else { Ok(n) } }
                },
                |e| e.0,
            )
            .await;
        assert_eq!(result.unwrap(), 2);
    }
}
