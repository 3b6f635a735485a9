//! BFF settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BFF_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Every field is optional; the
//! accessors supply the defaults.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use bff::inbound::http::rate_limit::RateLimitConfig;
use bff::outbound::upstream::DEFAULT_TIMEOUT;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use super::ServerConfig;
use super::config::DEFAULT_FRONTEND_URL;

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080";

/// Failures turning raw settings into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Settings could not be read from their sources.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// The upstream base URL is not a valid absolute URL.
    #[error("invalid upstream URL {value:?}: {source}")]
    InvalidUpstreamUrl {
        /// Raw configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// A zero-length rate limit window would never limit anything.
    #[error("rate limit window must be at least one second")]
    EmptyRateLimitWindow,
    /// A zero timeout fails every upstream call before it is sent.
    #[error("upstream timeout must be at least one second")]
    EmptyUpstreamTimeout,
}

/// Configuration values for the BFF process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BFF")]
pub struct BffSettings {
    /// Base URL of the upstream REST backend.
    pub upstream_url: Option<String>,
    /// Port to listen on.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Browser origin allowed to call the API.
    pub frontend_url: Option<String>,
    /// Requests allowed per client per window.
    pub rate_limit_max: Option<u32>,
    /// Rate limit window length in seconds.
    pub rate_limit_window_secs: Option<u64>,
    /// Per-call upstream timeout in seconds.
    pub upstream_timeout_secs: Option<u64>,
}

impl BffSettings {
    /// Read settings from CLI arguments, environment and config files.
    pub fn load_with_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|error| SettingsError::Load(error.to_string()))
    }

    /// Configured upstream URL text, falling back to the default.
    pub fn upstream_url_text(&self) -> &str {
        self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL)
    }

    /// Parsed upstream base URL.
    pub fn upstream_url(&self) -> Result<Url, SettingsError> {
        let value = self.upstream_url_text();
        Url::parse(value).map_err(|source| SettingsError::InvalidUpstreamUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Listening port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Allowed browser origin, falling back to the local dev server.
    pub fn frontend_url(&self) -> &str {
        self.frontend_url.as_deref().unwrap_or(DEFAULT_FRONTEND_URL)
    }

    /// Rate limit budget.
    pub fn rate_limit(&self) -> Result<RateLimitConfig, SettingsError> {
        let defaults = RateLimitConfig::default();
        let window = self
            .rate_limit_window_secs
            .map_or(defaults.window, Duration::from_secs);
        if window.is_zero() {
            return Err(SettingsError::EmptyRateLimitWindow);
        }
        Ok(RateLimitConfig {
            max_requests: self.rate_limit_max.unwrap_or(defaults.max_requests),
            window,
        })
    }

    /// Upstream call timeout.
    pub fn upstream_timeout(&self) -> Result<Duration, SettingsError> {
        let timeout = self
            .upstream_timeout_secs
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        if timeout.is_zero() {
            return Err(SettingsError::EmptyUpstreamTimeout);
        }
        Ok(timeout)
    }

    /// Resolve everything `create_server` needs.
    pub fn server_config(&self) -> Result<ServerConfig, SettingsError> {
        let bind_addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()));
        Ok(ServerConfig::new(bind_addr, self.upstream_url()?)
            .with_frontend_url(self.frontend_url())
            .with_rate_limit(self.rate_limit()?)
            .with_upstream_timeout(self.upstream_timeout()?))
    }
}
