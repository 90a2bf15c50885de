/// Preset retry policies for the kinds of failure the feed client recovers from
use crate::retry::RetryConfig;
use std::time::Duration;

/// Transport failures (connection refused, DNS, timeouts)
///
/// - 3 attempts
/// - 1s, then 2s between attempts
pub fn network_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 3,
        initial_backoff: Duration::from_millis(1000),
        max_backoff: Duration::from_secs(30),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

/// Authentication failures (token refresh races)
///
/// - 2 attempts
/// - 500ms between attempts
pub fn auth_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        initial_backoff: Duration::from_millis(500),
        max_backoff: Duration::from_secs(5),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}
