//! Error taxonomy for calls to the Campus backend
//!
//! Every category maps to a fixed user-facing message; the wrappers in the
//! feed client surface that message in `ApiResponse::error`.

use thiserror::Error;

/// Result type alias for backend calls
pub type Result<T> = std::result::Result<T, ApiError>;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const AUTH_ERROR_MESSAGE: &str = "Authentication required. Please log in.";
pub const VALIDATION_ERROR_MESSAGE: &str = "Invalid data. Please check your input.";
pub const NOT_FOUND_MESSAGE: &str = "The requested post could not be found.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connectivity or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// 401/403 from the backend
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Malformed request, rejected locally or by the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// 404 from the backend
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 5xx from the backend
    #[error("{0}")]
    Unavailable(String),

    /// Anything else, including undecodable responses
    #[error("{0}")]
    Fetch(String),
}

impl ApiError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, body.trim())
        };

        match status {
            401 | 403 => Self::Auth(detail),
            400 | 422 => Self::Validation(detail),
            404 => Self::NotFound(detail),
            500..=599 => Self::Unavailable(detail),
            _ => Self::Fetch(detail),
        }
    }

    /// Message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Auth(_) => AUTH_ERROR_MESSAGE.to_string(),
            Self::Validation(_) => VALIDATION_ERROR_MESSAGE.to_string(),
            Self::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            Self::Unavailable(msg) | Self::Fetch(msg) => msg.clone(),
        }
    }

    /// Transport failures and 5xx responses; 4xx answers will not change on replay
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Unavailable(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Fetch(format!("Invalid response body: {}", err))
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Network(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16(), "")
        } else {
            Self::Fetch(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Fetch(format!("Invalid response body: {}", err))
    }
}
