// ABOUTME: Utility functions shared by the download and command layers
// ABOUTME: Provides retry with exponential backoff for network stages

use crate::error::Result;
use std::time::Duration;

/// Upper bound for a single backoff sleep
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry a network operation with exponential backoff
///
/// Executes an async operation and retries it only while it fails with a
/// transient (transport-level) error. Status mismatches and every other error
/// are returned immediately. Each retry doubles the delay, up to
/// [`MAX_RETRY_DELAY`].
///
/// # Arguments
///
/// * `operation` - Async function to retry (FnMut returning Future\<Output = Result\<T\>\>)
/// * `max_retries` - Maximum number of retry attempts (0 = no retries, just initial attempt)
/// * `initial_delay` - Delay before first retry (doubles each subsequent retry)
///
/// # Examples
///
/// ```no_run
/// # use std::time::Duration;
/// # use sqldef_runner::utils::retry_with_backoff;
/// # async fn example() -> sqldef_runner::Result<()> {
/// let result = retry_with_backoff(
///     || async { Ok("success") },
///     3,  // Try up to 3 more times
///     Duration::from_secs(1)  // Start with 1s delay
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    max_retries: u32,
    initial_delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut delay = initial_delay;
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < max_retries => {
                tracing::warn!(
                    "Network request failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt + 1,
                    max_retries + 1,
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Double `delay`, saturating at [`MAX_RETRY_DELAY`]
fn next_delay(delay: Duration) -> Duration {
    delay.saturating_mul(2).min(MAX_RETRY_DELAY)
}
