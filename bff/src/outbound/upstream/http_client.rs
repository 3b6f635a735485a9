//! Reqwest-backed upstream client.
//!
//! This adapter owns transport details only: base URL resolution, default
//! headers, the per-call timeout and mapping every reqwest failure onto the
//! normalized [`UpstreamError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use tracing::{debug, warn};

use super::interceptors::{classify, decode_body, normalize_authorization};
use crate::domain::TraceId;
use crate::domain::ports::{
    UpstreamError, UpstreamGateway, UpstreamMethod, UpstreamRequest, UpstreamResponse,
};

/// Per-call timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream gateway adapter performing JSON requests against one base URL.
#[derive(Debug, Clone)]
pub struct UpstreamHttpClient {
    client: Client,
    base_url: Url,
}

impl UpstreamHttpClient {
    /// Build a client with a `Content-Type: application/json` default header
    /// and an explicit per-request timeout.
    ///
    /// ```
    /// use bff::outbound::upstream::{DEFAULT_TIMEOUT, UpstreamHttpClient};
    ///
    /// let base = url::Url::parse("http://localhost:8080").expect("valid url");
    /// let client = UpstreamHttpClient::new(base, DEFAULT_TIMEOUT).expect("client builds");
    /// assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, UpstreamError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|error| UpstreamError::request_setup(error.to_string()))
    }

    fn build(&self, mut request: UpstreamRequest) -> Result<reqwest::Request, UpstreamError> {
        normalize_authorization(request.headers_mut());
        let url = self.endpoint(request.path())?;
        let mut builder = self.client.request(to_reqwest_method(request.method()), url);
        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|error| UpstreamError::request_setup(error.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|error| UpstreamError::request_setup(error.to_string()))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }
        builder.build().map_err(map_transport_error)
    }

    async fn execute(&self, request: reqwest::Request) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        classify(status, decode_body(bytes.as_ref()))
    }
}

#[async_trait]
impl UpstreamGateway for UpstreamHttpClient {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let method = request.method();
        let path = request.path().to_owned();
        let trace_id = TraceId::current().map(|id| id.to_string());

        let outcome = match self.build(request) {
            Ok(request) => self.execute(request).await,
            Err(error) => Err(error),
        };

        match &outcome {
            Ok(response) => debug!(
                %method,
                path = %path,
                status = response.status,
                trace_id = trace_id.as_deref(),
                "upstream request completed"
            ),
            Err(error) => warn!(
                %method,
                path = %path,
                failure = ?error.normalized(),
                trace_id = trace_id.as_deref(),
                "upstream request failed"
            ),
        }
        outcome
    }
}

fn to_reqwest_method(method: UpstreamMethod) -> Method {
    match method {
        UpstreamMethod::Get => Method::GET,
        UpstreamMethod::Post => Method::POST,
        UpstreamMethod::Put => Method::PUT,
        UpstreamMethod::Delete => Method::DELETE,
    }
}

/// Builder failures happen before anything is sent; every other reqwest error
/// (connect, timeout, body read) means no usable response arrived.
fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_builder() {
        UpstreamError::request_setup(error.to_string())
    } else {
        UpstreamError::unreachable(error.to_string())
    }
}

#[cfg(test)]
#[path = "http_client_tests.rs"]
mod tests;
