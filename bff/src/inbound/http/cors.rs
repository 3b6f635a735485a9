//! Cross-origin policy for the single-page frontend.
//!
//! Only origins on the allow-list (normally just the configured frontend URL)
//! may call the API from a browser. Requests without an `Origin` header, such
//! as server-to-server calls and health checks, pass untouched. Allowed
//! origins are reflected with credentials enabled; anything else is answered
//! with 403 before reaching a handler.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
    HeaderMap, HeaderValue, ORIGIN, VARY,
};
use actix_web::{HttpResponse, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error;

/// Message returned for disallowed origins.
pub const NOT_ALLOWED_BY_CORS: &str = "Not allowed by CORS";
const ALLOWED_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// Origin allow-list middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bff::inbound::http::cors::OriginPolicy;
///
/// let _app = App::new().wrap(OriginPolicy::new(["http://localhost:5173"]));
/// ```
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Arc<Vec<String>>,
}

impl OriginPolicy {
    /// Build a policy from allowed origins. Trailing slashes are ignored.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = origins
            .into_iter()
            .map(|origin| origin.as_ref().trim_end_matches('/').to_owned())
            .collect();
        Self {
            allowed: Arc::new(allowed),
        }
    }

    /// Whether `origin` is on the allow-list.
    #[must_use]
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == origin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginPolicy
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = OriginPolicyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginPolicyMiddleware {
            service,
            policy: self.clone(),
        }))
    }
}

/// Service wrapper produced by [`OriginPolicy`].
pub struct OriginPolicyMiddleware<S> {
    service: S,
    policy: OriginPolicy,
}

fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

fn apply_origin_headers(headers: &mut HeaderMap, origin: &HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));
}

fn preflight_response(req: &ServiceRequest, origin: &HeaderValue) -> HttpResponse {
    let mut response = HttpResponse::NoContent().finish();
    let headers = response.headers_mut();
    apply_origin_headers(headers, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    if let Some(requested) = req.headers().get(ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        headers.append(VARY, HeaderValue::from_static("Access-Control-Request-Headers"));
    }
    response
}

impl<S, B> Service<ServiceRequest> for OriginPolicyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(origin) = req.headers().get(ORIGIN).cloned() else {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        };

        let allowed = origin
            .to_str()
            .is_ok_and(|value| self.policy.allows(value));
        if !allowed {
            warn!(origin = ?origin, path = req.path(), "rejected cross-origin request");
            return Box::pin(async move {
                let response = Error::forbidden(NOT_ALLOWED_BY_CORS).error_response();
                Ok(req.into_response(response).map_into_right_body())
            });
        }

        if is_preflight(&req) {
            let response = preflight_response(&req, &origin);
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            apply_origin_headers(res.headers_mut(), &origin);
            Ok(res.map_into_left_body())
        })
    }
}
