//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn failures into the `{"error": ...}` JSON envelope with the
//! carried status code.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, warn};

use crate::domain::{Error, TRACE_ID_HEADER, UpstreamError};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INVALID_JSON_BODY: &str = "Invalid JSON body";
const INVALID_PATH: &str = "Invalid path parameter";

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

/// Log an upstream failure for `context` and convert it for the client.
pub(crate) fn upstream_failure(context: &'static str, failure: UpstreamError) -> Error {
    warn!(failure = ?failure.normalized(), "{context}");
    Error::from(failure)
}

/// `JsonConfig` error handler routing body failures through the envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(INVALID_JSON_BODY).into()
}

/// `PathConfig` error handler routing path failures through the envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameter");
    Error::invalid_request(INVALID_PATH).into()
}
