//! Driven port for talking to the upstream shift tracker backend.
//!
//! The domain owns the request/response shapes and the normalized failure so
//! the services stay independent of the HTTP client. The outbound adapter is
//! responsible for turning every transport outcome into either an
//! [`UpstreamResponse`] or exactly one [`UpstreamError`] variant.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::define_port_error;
use crate::domain::BearerToken;

/// Message used when the upstream error body names no `error` or `message`.
pub const BACKEND_ERROR_FALLBACK: &str = "Backend error";
/// Message used when no response arrived from the upstream.
pub const BACKEND_UNAVAILABLE: &str = "Spring Boot backend is unavailable";
/// Message used when the request could not be built or sent.
pub const REQUEST_SETUP_ERROR: &str = "Request setup error";

/// Canonical spelling of the authorization header.
pub const AUTHORIZATION: &str = "Authorization";

define_port_error! {
    /// Normalized failure produced by the upstream gateway.
    ///
    /// Every failure carries a numeric status and a human-readable message,
    /// so callers branch on [`UpstreamError::status`] rather than on cause.
    pub enum UpstreamError {
        /// The upstream answered with a status of 400 or above.
        Rejected { status: u16, message: String, data: Value } =>
            "upstream rejected request with status {status}: {message}",
        /// The request was sent but no response arrived (network or timeout).
        Unreachable { original_error: String } =>
            "upstream unreachable: {original_error}",
        /// The request could not be constructed or sent.
        RequestSetup { original_error: String } =>
            "upstream request setup failed: {original_error}",
    }
}

impl UpstreamError {
    /// Status code the failure maps to.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Rejected { status, .. } => *status,
            Self::Unreachable { .. } => 503,
            Self::RequestSetup { .. } => 500,
        }
    }

    /// Human-readable message for the client.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message.as_str(),
            Self::Unreachable { .. } => BACKEND_UNAVAILABLE,
            Self::RequestSetup { .. } => REQUEST_SETUP_ERROR,
        }
    }

    /// Upstream error body, when one was received and was not empty.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Rejected { data, .. } if !data.is_null() => Some(data),
            _ => None,
        }
    }

    /// Transport error text for failures that never produced a response.
    #[must_use]
    pub fn original_error(&self) -> Option<&str> {
        match self {
            Self::Rejected { .. } => None,
            Self::Unreachable { original_error } | Self::RequestSetup { original_error } => {
                Some(original_error.as_str())
            }
        }
    }

    /// Whether the failure is an upstream 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }

    /// Borrowed `{status, message, data?, originalError?}` view for logs.
    #[must_use]
    pub fn normalized(&self) -> NormalizedFailure<'_> {
        NormalizedFailure {
            status: self.status(),
            message: self.message(),
            data: self.data(),
            original_error: self.original_error(),
        }
    }
}

/// Flat serialisable view of an [`UpstreamError`], logged on every failure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFailure<'a> {
    /// Status code.
    pub status: u16,
    /// Client-facing message.
    pub message: &'a str,
    /// Upstream error body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a Value>,
    /// Transport error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_error: Option<&'a str>,
}

/// HTTP verbs the BFF forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl UpstreamMethod {
    /// Upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for UpstreamMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the upstream.
///
/// Headers are kept as an ordered, case-preserving list so the outbound
/// adapter can reconcile differently-cased authorization headers before they
/// reach the case-insensitive wire header map.
///
/// # Examples
/// ```
/// use bff::domain::BearerToken;
/// use bff::domain::ports::{UpstreamMethod, UpstreamRequest};
///
/// let token = BearerToken::new("abc").expect("non-empty token");
/// let request = UpstreamRequest::get("/api/shifts/active").with_bearer(&token);
/// assert_eq!(request.method(), UpstreamMethod::Get);
/// assert_eq!(request.header("Authorization"), Some("Bearer abc"));
/// ```
#[derive(Clone, PartialEq)]
pub struct UpstreamRequest {
    method: UpstreamMethod,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl UpstreamRequest {
    /// Request with no headers and no body.
    pub fn new(method: UpstreamMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `GET path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Get, path)
    }

    /// `POST path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Post, path)
    }

    /// `PUT path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Put, path)
    }

    /// `DELETE path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(UpstreamMethod::Delete, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a header, keeping the caller's spelling of the name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_bearer(self, token: &BearerToken) -> Self {
        self.with_header(AUTHORIZATION, token.authorization_value())
    }

    /// HTTP verb.
    #[must_use]
    pub const fn method(&self) -> UpstreamMethod {
        self.method
    }

    /// Path relative to the upstream base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Mutable access for outbound transforms.
    pub fn headers_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.headers
    }

    /// First header whose name matches `name` exactly.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("UpstreamRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &header_names)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Successful upstream answer (status below 400).
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    /// HTTP status.
    pub status: u16,
    /// Decoded body; `None` when the upstream sent no content.
    pub body: Option<Value>,
}

impl UpstreamResponse {
    /// Response carrying a JSON body.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Response without content.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Body as a JSON value, `null` when empty.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.body.unwrap_or(Value::Null)
    }
}

/// Port for sending requests to the upstream backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Send one request and classify the outcome.
    ///
    /// Implementations must never let a transport error escape other than as
    /// one of the three [`UpstreamError`] variants.
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}
