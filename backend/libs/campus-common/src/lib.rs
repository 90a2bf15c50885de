//! Campus Common Library
//!
//! Shared types for talking to the Campus REST backend: the error taxonomy,
//! the `{ success, data, error, pagination }` envelope every client wrapper
//! returns, and a thin JSON HTTP client.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::{ApiError, Result};
pub use http_client::RestClient;
pub use models::{ApiResponse, Pagination};
