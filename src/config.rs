//! Client configuration

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the HTTP gateway.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the storefront API, e.g. `https://shop.example.com/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }

    /// Reads `STOREFRONT_API_URL` and `STOREFRONT_TIMEOUT_SECS`, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let base_url = std::env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("STOREFRONT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), Duration::from_secs);
        Self { base_url, timeout }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
