//! Retry policy for transient transport failures.
//!
//! Provides [`RetryConfig`] and the `with_retry()` helper that every
//! façade operation funnels its transport calls through. Only errors
//! classified transient by [`FutmarketError::is_transient()`] (timeouts
//! and connection failures) are retried; HTTP status and decode errors
//! propagate on first occurrence. Once attempts are exhausted the last
//! observed error is re-raised unchanged.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::telemetry;
use crate::{FutmarketError, Result};

/// Configuration for retry behaviour on transient errors.
///
/// Uses a fixed inter-attempt delay, not exponential backoff.
///
/// ```rust
/// # use futmarket::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .delay(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Fixed delay between attempts. Default: 2s.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    /// Create a new config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Set the fixed inter-attempt delay.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Execute an async operation with retry logic.
///
/// Retries transient errors up to `config.max_attempts` total attempts,
/// sleeping `config.delay` between them. Permanent errors are returned
/// immediately without retry; the last transient error is returned
/// unchanged once attempts are exhausted.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation: &'static str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..config.max_attempts.max(1) {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                metrics::counter!(telemetry::RETRIES_TOTAL, "operation" => operation)
                    .increment(1);
                if attempt + 1 < config.max_attempts {
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = config.delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(config.delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e), // permanent error, no retry
        }
    }
    Err(last_err.unwrap_or_else(|| FutmarketError::ConnectionFailed("no attempts made".into())))
}
