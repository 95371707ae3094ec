//! Retry logic utilities for carrier calls.
//!
//! Both FedEx endpoints share one executor: run the operation, classify the
//! failure, and either resubmit after an exponential backoff or give up.
//! Deterministic failures (see [`ErrorKind::is_retryable`]) short-circuit
//! without sleeping; the error from the final attempt propagates to the
//! caller unchanged.
//!
//! [`ErrorKind::is_retryable`]: crate::error::ErrorKind::is_retryable

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::context::RequestContext;
use crate::error::ShippingError;

/// Upper bound (exclusive) on the random jitter added to every backoff.
const JITTER_MS: u64 = 1_000;

/// Attempt budget and delay bounds for one logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each attempt after.
    pub base_delay: Duration,
    /// Cap applied to the delay after jitter is added.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy for the OAuth token exchange.
    #[must_use]
    pub const fn auth() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Policy for the rate-quote request.
    #[must_use]
    pub const fn rates() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(15),
        }
    }

    /// Backoff to sleep after a failed attempt (1-based), jitter included.
    ///
    /// The cap is applied after the jitter so `max_delay` is a hard bound
    /// on any single sleep.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(31);
        let backoff = self.base_delay.saturating_mul(1_u32 << shift);
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..JITTER_MS));
        backoff.saturating_add(jitter).min(self.max_delay)
    }
}

/// Runs `operation` under `policy`, retrying transient failures.
///
/// Sleeps are plain awaits on the calling task, so concurrent requests back
/// off independently. `op_name` only labels log lines.
pub async fn retry<T, F, Fut>(
    policy: RetryPolicy,
    op_name: &str,
    ctx: &RequestContext,
    mut operation: F,
) -> Result<T, ShippingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShippingError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1_u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => {
                tracing::debug!(
                    request_id = %ctx.request_id(),
                    operation = op_name,
                    kind = ?err.kind,
                    "failure is not retryable"
                );
                return Err(err);
            }
            Err(err) if attempt >= max_attempts => {
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    operation = op_name,
                    attempts = attempt,
                    kind = ?err.kind,
                    "giving up after final attempt"
                );
                return Err(err);
            }
            Err(err) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    request_id = %ctx.request_id(),
                    operation = op_name,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    kind = ?err.kind,
                    "attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
