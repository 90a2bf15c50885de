use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::models::{UnknownRole, UserPreferences, UserRole, Viewer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("FEED_VIEWER_ROLE: {0}")]
    InvalidRole(#[from] UnknownRole),

    #[error("FEED_LOG_FORMAT must be text or json, got {0:?}")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedClientConfig {
    pub api: ApiConfig,
    pub cache: CacheSettings,
    pub viewer: Viewer,
    #[serde(default)]
    pub preferences: UserPreferences,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub retry_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl FeedClientConfig {
    /// Load from the process environment after reading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load through `lookup`; unset and blank variables take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let role = match var("FEED_VIEWER_ROLE") {
            Some(role) => role.parse::<UserRole>()?,
            None => UserRole::Member,
        };

        Ok(FeedClientConfig {
            api: ApiConfig {
                base_url: var("FEED_API_BASE_URL").unwrap_or_else(default_base_url),
                auth_token: var("FEED_API_TOKEN"),
                request_timeout_secs: parse_number(
                    "FEED_REQUEST_TIMEOUT_SECS",
                    var("FEED_REQUEST_TIMEOUT_SECS"),
                    default_request_timeout_secs(),
                )?,
                retry_enabled: parse_bool("FEED_RETRY_ENABLED", var("FEED_RETRY_ENABLED"), true)?,
            },
            cache: CacheSettings {
                enabled: parse_bool("FEED_CACHE_ENABLED", var("FEED_CACHE_ENABLED"), true)?,
                ttl_secs: parse_number(
                    "FEED_CACHE_TTL_SECS",
                    var("FEED_CACHE_TTL_SECS"),
                    default_cache_ttl_secs(),
                )?,
            },
            viewer: Viewer::new(var("FEED_VIEWER_ID").unwrap_or_default(), role),
            preferences: UserPreferences {
                followed_user_ids: split_list(var("FEED_FOLLOWED_USERS")),
                interests: split_list(var("FEED_INTERESTS")),
            },
            log: LogConfig {
                level: var("FEED_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                format: match var("FEED_LOG_FORMAT") {
                    Some(format) => format.parse()?,
                    None => LogFormat::default(),
                },
            },
        })
    }
}

fn parse_number(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}

fn parse_bool(var: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    300
}
