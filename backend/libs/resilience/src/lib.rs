//! Retry helpers for the feed client
//!
//! - **Retry**: exponential backoff with optional jitter; the last error is
//!   returned once every attempt has failed
//! - **Presets**: fixed policies for network and authentication failures
//!
//! # Example
//!
//! ```rust,no_run
//! use resilience::{presets, with_retry};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = presets::network_retry();
//!
//!     let result = with_retry(&config, || async {
//!         // Your HTTP call here
//!         Ok::<_, String>(())
//!     })
//!     .await;
//! }
//! ```

pub mod presets;
pub mod retry;

pub use presets::{auth_retry, network_retry};
pub use retry::{with_retry, with_retry_if, RetryConfig};
