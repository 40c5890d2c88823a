use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Response, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use yansi::Paint;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::utils::{absolute_url, resolve_image_url};

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

/// Status codes the backend uses to report a healthy liveness probe.
pub fn is_live_status(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

/// HTTP client bound to one API base URL and request timeout.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiConfig,
    echo: bool,
}

impl ApiClient {
    /// Create a client from explicit settings
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use wasa::{ApiClient, ApiConfig};
    ///
    /// let client = ApiClient::new(ApiConfig::new("http://api.example.com/", Duration::from_secs(15))).unwrap();
    /// assert_eq!(client.url("/liveness"), "http://api.example.com/liveness");
    /// ```
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("wasa/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout.as_millis() as u64, "api client ready");
        Ok(Self { client, config, echo: true })
    }

    /// Create a client from `API_URL` / `API_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Never print the curl request/response echo for this client
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    fn log_output(&self, msg: String) {
        if self.echo && !SILENT.load(Ordering::Relaxed) {
            println!("{}", msg);
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full URL for an endpoint; absolute URLs are returned as given.
    pub fn url(&self, endpoint: &str) -> String {
        absolute_url(&self.config.base_url, endpoint)
    }

    /// Resolve an image path against this client's base URL.
    pub fn resolve_image_url(&self, path: Option<&str>, fallback: Option<&str>) -> Option<String> {
        resolve_image_url(&self.config.base_url, path, fallback)
    }

    /// Send a single GET request. Any HTTP status is returned as `Ok`.
    pub async fn get(&self, endpoint: &str) -> Result<Response, ApiError> {
        let url = self.url(endpoint);

        // --- Curl Logging ---
        let parts = [
            Paint::new("curl").fg(yansi::Color::Green).bold().to_string(),
            format!("-X {}", Paint::new("GET").fg(yansi::Color::Yellow).bold()),
            format!("'{}'", Paint::new(&url).fg(yansi::Color::Cyan)),
            format!("{} {}", Paint::new("-m").fg(yansi::Color::Magenta), self.config.timeout.as_secs_f64()),
        ];
        self.log_output(format!("Request:\n{}", parts.join(" ")));
        // --------------------

        match self.client.get(&url).send().await {
            Ok(resp) => {
                let status = resp.status();
                tracing::debug!(%url, %status, "GET completed");
                self.log_output(format!("Response:\n{}", Paint::new(status.to_string()).rgb(100, 100, 100)));
                Ok(resp)
            }
            Err(e) => {
                tracing::warn!(%url, %e, "GET failed");
                Err(e.into())
            }
        }
    }

    /// Probe `/liveness`; healthy only on 200 or 204.
    pub async fn liveness(&self) -> Result<StatusCode, ApiError> {
        let status = self.get("/liveness").await?.status();
        if is_live_status(status) {
            Ok(status)
        } else {
            Err(ApiError::UnexpectedStatus(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::new("http://api.example.com", Duration::from_millis(500))).unwrap()
    }

    #[test]
    fn endpoint_urls_follow_resolution_rules() {
        let c = client();
        assert_eq!(c.url("/liveness"), "http://api.example.com/liveness");
        assert_eq!(c.url("users/1"), "http://api.example.com/users/1");
        assert_eq!(c.url("https://other.example.com/x"), "https://other.example.com/x");
    }

    #[test]
    fn client_resolves_images_against_its_base() {
        let c = client();
        assert_eq!(
            c.resolve_image_url(Some("/images/x.png"), None).as_deref(),
            Some("http://api.example.com/images/x.png")
        );
        assert_eq!(c.resolve_image_url(None, Some("fallback.png")).as_deref(), Some("fallback.png"));
    }

    #[test]
    fn quiet_disables_echo() {
        let c = client();
        assert!(c.echo);
        let q = c.clone().quiet();
        assert!(!q.echo);
        assert_eq!(q.base_url(), c.base_url());
    }

    #[test]
    fn live_statuses() {
        assert!(is_live_status(StatusCode::OK));
        assert!(is_live_status(StatusCode::NO_CONTENT));
        assert!(!is_live_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_live_status(StatusCode::CREATED));
    }
}
