//! Fixed retry policies for callers that wrap their own backend calls

use resilience::{presets, with_retry};
use std::fmt::Display;
use std::future::Future;

/// Up to 3 attempts, 1s then 2s apart; the last error is returned
pub async fn retry_on_network_error<F, Fut, T, E>(f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    with_retry(&presets::network_retry(), f).await
}

/// Up to 2 attempts, 500ms apart; the last error is returned
pub async fn retry_on_auth_error<F, Fut, T, E>(f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    with_retry(&presets::auth_retry(), f).await
}
