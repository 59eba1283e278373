// Retry logic with exponential backoff
//
// Wraps any future-returning operation. Transient failures are retried with
// scheduled (never blocking) delays; non-transient failures are rethrown on
// the spot so bad input and missing credentials fail fast.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::Result;

/// Additional attempts after the first, per the dispatch policy.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

const BASE_DELAY_MS: u64 = 1000;

/// Execute `f` with the default retry budget.
pub async fn with_retry<F, Fut, T>(f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    with_retry_limit(f, DEFAULT_MAX_RETRIES).await
}

/// Execute `f` up to `max_retries + 1` times.
///
/// Before retry n the wrapper sleeps `1000ms * 2^(n-1)` (1s, 2s, ...).
/// Errors whose `is_transient()` is false are returned immediately without
/// consuming the remaining budget.
pub async fn with_retry_limit<F, Fut, T>(f: F, max_retries: u32) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) if attempt > max_retries => return Err(err),
            Err(err) => {
                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt - 1));
                tracing::warn!(
                    attempt,
                    max_attempts = max_retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "generation attempt failed, retrying"
                );
                sleep(delay).await;
            }
        }
    }
}
