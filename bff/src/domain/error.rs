//! Client-facing error envelope.
//!
//! Every failure the route layer returns to the browser is an [`Error`]. It
//! carries the HTTP status as a plain number so upstream statuses can be
//! mirrored verbatim, and serialises as `{"error": <message>}` (plus
//! `traceId` when a trace is in scope), which is the shape the SPA reads.

use serde::Serialize;

use super::ports::UpstreamError;
use super::trace_id::TraceId;

const FALLBACK_STATUS: u16 = 500;

/// Route-layer error payload.
///
/// # Examples
/// ```
/// use bff::domain::Error;
///
/// let err = Error::not_found("No active shift found");
/// assert_eq!(err.status(), 404);
/// assert_eq!(err.message(), "No active shift found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    #[serde(skip)]
    status: u16,
    #[serde(rename = "error")]
    message: String,
    #[serde(rename = "traceId", skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Error {
    /// Create an error with an explicit status, capturing the current trace id.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// HTTP status code to answer with.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Human-readable message returned to the client.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier of the request that produced this error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Override the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// 400 Bad Request.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    /// 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    /// 403 Forbidden.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(403, message)
    }

    /// 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    /// 429 Too Many Requests.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(429, message)
    }

    /// 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FALLBACK_STATUS, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl From<UpstreamError> for Error {
    fn from(value: UpstreamError) -> Self {
        let status = match value.status() {
            status @ 400..=999 => status,
            _ => FALLBACK_STATUS,
        };
        Self::new(status, value.message())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(Error::invalid_request("bad"), 400)]
    #[case(Error::unauthorized("who"), 401)]
    #[case(Error::forbidden("no"), 403)]
    #[case(Error::not_found("gone"), 404)]
    #[case(Error::too_many_requests("slow down"), 429)]
    #[case(Error::internal("boom"), 500)]
    fn constructors_set_status(#[case] error: Error, #[case] expected: u16) {
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn serialises_message_under_error_key() {
        let value = serde_json::to_value(Error::unauthorized("Authentication required"))
            .expect("serialise error");
        assert_eq!(value, json!({ "error": "Authentication required" }));
    }

    #[test]
    fn serialises_trace_id_when_present() {
        let value = serde_json::to_value(Error::internal("boom").with_trace_id("abc"))
            .expect("serialise error");
        assert_eq!(
            value.get("traceId").and_then(Value::as_str),
            Some("abc"),
            "trace id should be exposed in camelCase"
        );
    }

    #[rstest]
    #[case(UpstreamError::rejected(409_u16, "Username already exists", Value::Null), 409, "Username already exists")]
    #[case(UpstreamError::unreachable("connection refused"), 503, "Spring Boot backend is unavailable")]
    #[case(UpstreamError::request_setup("bad header"), 500, "Request setup error")]
    fn upstream_failures_map_status_and_message_verbatim(
        #[case] failure: UpstreamError,
        #[case] status: u16,
        #[case] message: &str,
    ) {
        let error = Error::from(failure);
        assert_eq!(error.status(), status);
        assert_eq!(error.message(), message);
    }

    #[test]
    fn non_error_upstream_status_falls_back_to_internal() {
        let error = Error::from(UpstreamError::rejected(302_u16, "moved", Value::Null));
        assert_eq!(error.status(), 500);
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
    }
}
