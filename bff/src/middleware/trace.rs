//! Request tracing middleware.
//!
//! Every request runs inside a fresh [`TraceId`] scope. The identifier is
//! echoed in the `trace-id` response header, picked up by error bodies and
//! upstream log lines, and closes the request with one access-log line.
//!
//! Task-locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] when it must keep the identifier.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware giving each request a [`TraceId`] and an access-log line.
///
/// Handlers read the identifier with [`TraceId::current`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bff::Trace;
///
/// let _app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

/// What the access log needs from the request, captured before it is consumed.
struct RequestLine {
    method: Method,
    path: String,
    started: Instant,
}

impl RequestLine {
    fn capture(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().clone(),
            path: req.path().to_owned(),
            started: Instant::now(),
        }
    }

    fn log_completed(&self, trace_id: TraceId, status: u16) {
        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            trace_id = %trace_id,
            method = %self.method,
            path = %self.path,
            status,
            elapsed_ms,
            "request completed"
        );
    }
}

fn stamp_trace_header<B>(res: &mut ServiceResponse<B>, trace_id: TraceId) {
    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(err) => error!(error = %err, %trace_id, "trace id is not a valid header value"),
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = TraceId::generate();
        let line = RequestLine::capture(&req);
        let fut = self.service.call(req);
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            stamp_trace_header(&mut res, trace_id);
            line.log_completed(trace_id, res.status().as_u16());
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for request tracing.
    use super::*;
    use crate::domain::Error as ApiError;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use serde_json::Value;

    async fn echo_trace_id() -> HttpResponse {
        let body = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
        HttpResponse::Ok().body(body)
    }

    async fn failing() -> Result<HttpResponse, ApiError> {
        Err(ApiError::new(502, "Bad gateway"))
    }

    fn get_root() -> actix_http::Request {
        actix_test::TestRequest::get().uri("/").to_request()
    }

    fn header_of<B>(res: &ServiceResponse<B>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
            .expect("trace-id header")
    }

    #[actix_web::test]
    async fn handler_runs_inside_the_trace_scope() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;

        let res = actix_test::call_service(&app, get_root()).await;
        let header = header_of(&res);
        let body = actix_test::read_body(res).await;

        assert!(header.parse::<TraceId>().is_ok(), "header should be a UUID");
        assert_eq!(body.as_ref(), header.as_bytes());
    }

    #[actix_web::test]
    async fn error_body_and_header_share_the_trace_id() {
        let app = actix_test::init_service(
            App::new().wrap(Trace).route("/", web::get().to(failing)),
        )
        .await;

        let res = actix_test::call_service(&app, get_root()).await;
        assert_eq!(res.status().as_u16(), 502);
        let header = header_of(&res);
        let body: Value = actix_test::read_body_json(res).await;

        assert_eq!(body["traceId"].as_str(), Some(header.as_str()));
        assert_eq!(body["error"], "Bad gateway");
    }

    #[actix_web::test]
    async fn each_request_gets_a_new_identifier() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;

        let first = actix_test::call_service(&app, get_root()).await;
        let second = actix_test::call_service(&app, get_root()).await;

        assert_ne!(header_of(&first), header_of(&second));
    }
}
