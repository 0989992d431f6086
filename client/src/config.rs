//! Client configuration.

use std::time::Duration;

/// Default gateway address for a local deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection settings for [`crate::HttpGatewayClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway root, without a trailing slash.
    pub base_url: String,

    /// Optional bearer token sent on every request.
    pub token: Option<String>,

    /// Bound on registration, order and generic POST calls.
    pub request_timeout: Duration,

    /// Bound on the readiness probe.
    pub health_timeout: Duration,

    /// Bound on the restaurant listing call.
    pub list_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            request_timeout: Duration::from_secs(30),
            health_timeout: Duration::from_secs(5),
            list_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Config pointing at `base_url` with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Short timeouts suitable for tests.
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            request_timeout: Duration::from_secs(2),
            health_timeout: Duration::from_millis(500),
            list_timeout: Duration::from_secs(1),
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Base URL with any trailing slashes removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
