use std::future::Future;
use std::time::Duration;

/// Bounded retry with exponential backoff. The delay after failed attempt
/// `n` (1-based) is `base * 2^(n-1)`, capped at `ceiling`. No delay follows
/// the last attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    base: Duration,
    ceiling: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_secs(5))
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration, ceiling: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
            ceiling,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Delay to wait after the given failed attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self.base.saturating_mul(1 << exponent);
        delay.min(self.ceiling)
    }

    /// Run `op` until it succeeds or `max_attempts` is reached.
    ///
    /// `op` receives the 1-based attempt number. On exhaustion returns the
    /// last error along with the number of attempts made.
    pub async fn retry<T, E, F, Fut>(&self, mut op: F) -> Result<T, (u32, E)>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::error!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Connection attempt failed"
                    );
                    if attempt >= self.max_attempts {
                        tracing::error!("All connection attempts failed");
                        return Err((attempt, e));
                    }
                    let delay = self.delay(attempt);
                    tracing::info!(delay_ms = delay.as_millis() as u64, "Retrying connection");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delays_double_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_secs(1));
        assert_eq!(policy.delay(2), Duration::from_secs(2));
        assert_eq!(policy.delay(3), Duration::from_secs(4));
        assert_eq!(policy.delay(4), Duration::from_secs(5));
        assert_eq!(policy.delay(40), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::default().with_max_attempts(0);
        assert_eq!(policy.max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_three_attempts() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let result: Result<(), (u32, String)> = RetryPolicy::default()
            .retry(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err("refused".to_string()) }
            })
            .await;

        let (attempts, err) = result.unwrap_err();
        assert_eq!(attempts, 3);
        assert_eq!(err, "refused");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s after the first failure, 2s after the second, nothing after the last
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_stops_on_success() {
        let result: Result<u32, (u32, String)> = RetryPolicy::default()
            .retry(|attempt| async move {
                if attempt < 2 {
                    Err("not yet".to_string())
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
    }
}
