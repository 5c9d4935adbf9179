//! Bounded polling for external readiness.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::StepError;

/// Poll `probe` every `interval` until it returns `true`.
///
/// Never waits longer than `timeout`; the probe is always evaluated at least
/// once.
///
/// # Errors
///
/// Returns `StepError::TimeoutExceeded` naming `what` when the deadline passes.
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<(), StepError>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = bool> + Send,
{
    let deadline = Instant::now() + timeout;
    loop {
        if probe().await {
            return Ok(());
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(StepError::TimeoutExceeded {
                what: what.to_string(),
                seconds: timeout.as_secs(),
            });
        }
        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}
