use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_HEALTHCHECK_PORT: u16 = 3000;

pub const API_URL_VAR: &str = "API_URL";
pub const API_TIMEOUT_VAR: &str = "API_TIMEOUT_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API_TIMEOUT_MS value: {0:?} (expected a positive number of milliseconds)")]
    InvalidTimeout(String),
}

/// Settings shared by every request made through [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    /// Origin requests and image paths are resolved against, without a trailing slash
    pub base_url: String,
    #[serde(rename = "timeout_ms", serialize_with = "serialize_millis")]
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: sanitize_base_url(base_url),
            timeout,
        }
    }

    /// Read `API_URL` and `API_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_api_base_url(),
            timeout: get_api_timeout()?,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, Duration::from_millis(DEFAULT_API_TIMEOUT_MS))
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

pub fn load_env_file(env_file: Option<&str>) {
    let loaded = if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).map(|_| path.to_string())
    } else {
        dotenvy::dotenv().map(|p| p.display().to_string())
    };
    match loaded {
        Ok(path) => tracing::debug!(%path, "loaded env file"),
        Err(e) => tracing::debug!(%e, "no env file loaded"),
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var(API_URL_VAR).unwrap_or_default())
}

pub fn get_api_timeout() -> Result<Duration, ConfigError> {
    match env::var(API_TIMEOUT_VAR) {
        Ok(raw) => parse_timeout_ms(&raw),
        Err(_) => Ok(Duration::from_millis(DEFAULT_API_TIMEOUT_MS)),
    }
}

pub fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(Duration::from_millis(DEFAULT_API_TIMEOUT_MS));
    }
    match t.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
