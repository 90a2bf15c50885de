//! Campus feed client
//!
//! Fetches feed posts from the Campus backend and turns them into
//! view-ready data:
//! - `services`: pure parsing, scoring, formatting and normalization
//! - `api`: cached, retried wrappers over the `/feed` endpoints
//! - `config`: environment-driven settings for the binary and embedders

pub mod api;
pub mod config;
pub mod models;
pub mod retry;
pub mod services;

pub use api::{BatchOutcome, BatchSummary, FeedApi};
pub use campus_common::{ApiError, ApiResponse, Pagination};
pub use config::{ConfigError, FeedClientConfig, LogFormat};
pub use models::{Comment, FeedQuery, Post, UserPreferences, UserRole, Viewer};
