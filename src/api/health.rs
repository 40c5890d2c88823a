//! Local liveness probe, meant for container health checks.
//!
//! Exit semantics mirror the backend's probe: healthy only when
//! `http://localhost:<port>/liveness` answers 200 or 204. Nothing is
//! printed on stdout.

use reqwest::StatusCode;

use super::client::ApiClient;
use super::error::ApiError;
use crate::config::{self, ApiConfig, ConfigError};

pub fn liveness_url(port: u16) -> String {
    format!("http://localhost:{}/liveness", port)
}

/// Settings for probing the local API on `port`, with the timeout from `API_TIMEOUT_MS`.
pub fn local_config(port: u16) -> Result<ApiConfig, ConfigError> {
    Ok(ApiConfig::new(
        &format!("http://localhost:{}", port),
        config::get_api_timeout()?,
    ))
}

pub async fn probe(config: ApiConfig) -> Result<StatusCode, ApiError> {
    let client = ApiClient::new(config)?.quiet();
    let result = client.liveness().await;
    match &result {
        Ok(status) => tracing::info!(base_url = client.base_url(), %status, "healthcheck passed"),
        Err(e) => tracing::error!(base_url = client.base_url(), %e, "healthcheck failed"),
    }
    result
}
