use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for connection attempts
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries allowed after the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each failure
    pub initial_delay: Duration,

    /// Ceiling applied while the delay doubles
    pub max_delay: Duration,

    /// Randomize each delay to avoid thundering-herd reconnects
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay before the retry following `failures` failed attempts
    fn delay_after(&self, failures: u32) -> Duration {
        let doubled = self
            .initial_delay
            .saturating_mul(1u32 << failures.min(16));
        let capped = doubled.min(self.max_delay);

        if self.use_jitter {
            jittered(capped)
        } else {
            capped
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            use_jitter: true,
        }
    }
}

/// Scale a delay to 50-100% of its value
fn jittered(delay: Duration) -> Duration {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let factor = 0.5 + (nanos % 500) as f64 / 1000.0;

    delay.mul_f64(factor)
}

/// Run `operation`, retrying failures under the given policy
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut failures = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if failures > 0 {
                    debug!("Operation succeeded after {} retries", failures);
                }
                return Ok(value);
            }
            Err(e) if failures >= config.max_retries => {
                warn!("Operation failed after {} attempts: {}", failures + 1, e);
                return Err(e);
            }
            Err(e) => {
                let delay = config.delay_after(failures);
                failures += 1;
                debug!(
                    "Operation failed (attempt {} of {}): {}. Retrying in {:?}...",
                    failures,
                    config.max_retries + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Retry with the default policy (3 retries, 100ms initial delay)
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}
