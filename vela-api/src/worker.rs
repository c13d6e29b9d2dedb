use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, info};
use vela_guard::{CsrfStore, RateLimiter};

/// Periodic sweep of expired CSRF tokens and stale rate-limit windows.
/// Runs on a fixed timer, independent of the request path.
pub async fn start_sweep_worker(
    csrf: Arc<CsrfStore>,
    rate_limiter: Arc<RateLimiter>,
    interval_seconds: u64,
) {
    let mut ticker = interval(Duration::from_secs(interval_seconds));
    info!("Guard sweep worker started (every {}s)", interval_seconds);

    loop {
        ticker.tick().await;

        let expired_tokens = csrf.sweep_expired();
        let stale_windows = rate_limiter.sweep();

        if expired_tokens > 0 || stale_windows > 0 {
            debug!(
                "Sweep removed {} expired CSRF tokens, {} stale rate windows",
                expired_tokens, stale_windows
            );
        }
    }
}
