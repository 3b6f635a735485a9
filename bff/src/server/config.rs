//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use bff::inbound::http::rate_limit::RateLimitConfig;
use bff::outbound::upstream::DEFAULT_TIMEOUT;
use url::Url;

/// Browser origin allowed when none is configured (the Vite dev server).
pub(super) const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upstream_url: Url,
    pub(crate) upstream_timeout: Duration,
    pub(crate) frontend_url: String,
    pub(crate) rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Construct a configuration with default timeout, origin and rate limit.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, upstream_url: Url) -> Self {
        Self {
            bind_addr,
            upstream_url,
            upstream_timeout: DEFAULT_TIMEOUT,
            frontend_url: DEFAULT_FRONTEND_URL.to_owned(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Set the browser origin allowed by the CORS policy.
    #[must_use]
    pub fn with_frontend_url(mut self, frontend_url: impl Into<String>) -> Self {
        self.frontend_url = frontend_url.into();
        self
    }

    /// Set the per-client request budget.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the per-call upstream timeout.
    #[must_use]
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the upstream base URL.
    #[must_use]
    pub fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }
}
