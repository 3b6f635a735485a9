//! Per-client request rate limiting.
//!
//! A fixed window counter keyed by client IP: each client may make
//! `max_requests` requests per `window`; further requests in the same window
//! are answered with 429 and a `Retry-After` hint. Counters live in process
//! memory and are shared across all Actix workers.
//!
//! Expired windows are swept every [`CLEANUP_INTERVAL`] checks so the map
//! stays bounded by the number of clients active in one window.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::{
    ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::warn;

use crate::domain::Error;

/// Message returned once a client exceeds its budget.
pub const TOO_MANY_REQUESTS: &str = "Too many requests from this IP, please try again later.";
/// Number of checks between sweeps of expired windows.
pub const CLEANUP_INTERVAL: u64 = 1_000;

const RATE_LIMIT_LIMIT: &str = "ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "ratelimit-reset";

/// Request budget per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub max_requests: u32,
    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// Outcome of a single budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request fits in the current window.
    Allowed {
        /// Requests left in the window after this one.
        remaining: u32,
        /// Time until the window resets.
        reset_after: Duration,
    },
    /// The budget is exhausted until the window resets.
    Limited {
        /// Time until the window resets.
        retry_after: Duration,
    },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct LimiterState {
    windows: HashMap<String, Window>,
    checks: u64,
}

/// Fixed window counter keyed by client identifier.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    state: Mutex<LimiterState>,
}

impl FixedWindowLimiter {
    /// Create an empty limiter.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            state: Mutex::new(LimiterState::default()),
        }
    }

    /// Budget applied to every client.
    #[must_use]
    pub const fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Count one request from `key` at `now`.
    pub fn check(&self, key: &str, now: Instant) -> Decision {
        let RateLimitConfig {
            max_requests,
            window,
        } = self.config;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        state.checks = state.checks.wrapping_add(1);
        if state.checks % CLEANUP_INTERVAL == 0 {
            state
                .windows
                .retain(|_, entry| now.saturating_duration_since(entry.started) < window);
        }

        let entry = state.windows.entry(key.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.saturating_duration_since(entry.started) >= window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        let reset_after = window.saturating_sub(now.saturating_duration_since(entry.started));
        if entry.count >= max_requests {
            return Decision::Limited {
                retry_after: reset_after,
            };
        }
        entry.count += 1;
        Decision::Allowed {
            remaining: max_requests - entry.count,
            reset_after,
        }
    }

    /// Number of clients currently tracked.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .windows
            .len()
    }
}

/// Whole seconds, rounded up so clients never retry early.
fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

/// Rate limiting middleware.
///
/// Construct once and clone into each worker's `App` so every worker shares
/// the same counters.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bff::inbound::http::rate_limit::{RateLimit, RateLimitConfig};
///
/// let limit = RateLimit::new(RateLimitConfig::default());
/// let _app = App::new().wrap(limit.clone());
/// ```
#[derive(Debug, Clone)]
pub struct RateLimit {
    limiter: Arc<FixedWindowLimiter>,
}

impl RateLimit {
    /// Create middleware with fresh counters.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(FixedWindowLimiter::new(config)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: S,
    limiter: Arc<FixedWindowLimiter>,
}

fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .or_else(|| {
            req.connection_info()
                .realip_remote_addr()
                .map(str::to_owned)
        })
        .unwrap_or_else(|| "unknown".to_owned())
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let key = client_key(&req);
        let limit = self.limiter.config().max_requests;
        match self.limiter.check(&key, Instant::now()) {
            Decision::Limited { retry_after } => {
                warn!(client = %key, path = req.path(), "rate limit exceeded");
                Box::pin(async move {
                    let mut response = Error::too_many_requests(TOO_MANY_REQUESTS).error_response();
                    response
                        .headers_mut()
                        .insert(RETRY_AFTER, HeaderValue::from(ceil_secs(retry_after)));
                    Ok(req.into_response(response).map_into_right_body())
                })
            }
            Decision::Allowed {
                remaining,
                reset_after,
            } => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static(RATE_LIMIT_LIMIT),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static(RATE_LIMIT_REMAINING),
                        HeaderValue::from(remaining),
                    );
                    headers.insert(
                        HeaderName::from_static(RATE_LIMIT_RESET),
                        HeaderValue::from(ceil_secs(reset_after)),
                    );
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the fixed window limiter.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::{fixture, rstest};
    use std::net::SocketAddr;

    #[fixture]
    fn limiter() -> FixedWindowLimiter {
        FixedWindowLimiter::new(RateLimitConfig {
            max_requests: 2,
            window: Duration::from_secs(60),
        })
    }

    #[rstest]
    fn limits_after_budget_is_spent(limiter: FixedWindowLimiter) {
        let now = Instant::now();
        assert!(matches!(
            limiter.check("10.0.0.1", now),
            Decision::Allowed { remaining: 1, .. }
        ));
        assert!(matches!(
            limiter.check("10.0.0.1", now),
            Decision::Allowed { remaining: 0, .. }
        ));
        assert_eq!(
            limiter.check("10.0.0.1", now + Duration::from_secs(15)),
            Decision::Limited {
                retry_after: Duration::from_secs(45)
            }
        );
    }

    #[rstest]
    fn clients_are_counted_separately(limiter: FixedWindowLimiter) {
        let now = Instant::now();
        limiter.check("10.0.0.1", now);
        limiter.check("10.0.0.1", now);
        assert!(matches!(
            limiter.check("10.0.0.2", now),
            Decision::Allowed { remaining: 1, .. }
        ));
    }

    #[rstest]
    fn window_resets_after_expiry(limiter: FixedWindowLimiter) {
        let now = Instant::now();
        limiter.check("10.0.0.1", now);
        limiter.check("10.0.0.1", now);
        assert!(matches!(
            limiter.check("10.0.0.1", now + Duration::from_secs(60)),
            Decision::Allowed { remaining: 1, .. }
        ));
    }

    #[test]
    fn sweeps_expired_windows() {
        let limiter = FixedWindowLimiter::new(RateLimitConfig {
            max_requests: 5,
            window: Duration::from_secs(1),
        });
        let start = Instant::now();
        for n in 0..(CLEANUP_INTERVAL - 1) {
            limiter.check(&format!("client-{n}"), start);
        }
        assert_eq!(limiter.tracked_clients(), usize::try_from(CLEANUP_INTERVAL - 1).unwrap_or(0));

        limiter.check("late", start + Duration::from_secs(2));
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[rstest]
    #[case(Duration::from_secs(3), 3)]
    #[case(Duration::from_millis(2_001), 3)]
    #[case(Duration::ZERO, 0)]
    fn rounds_retry_after_up(#[case] duration: Duration, #[case] expected: u64) {
        assert_eq!(ceil_secs(duration), expected);
    }

    #[actix_web::test]
    async fn middleware_answers_429_once_budget_is_spent() {
        let limit = RateLimit::new(RateLimitConfig {
            max_requests: 1,
            window: Duration::from_secs(900),
        });
        let app = actix_test::init_service(
            App::new()
                .wrap(limit)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let peer: SocketAddr = "192.0.2.7:50000".parse().expect("socket address");

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").peer_addr(peer).to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(
            first
                .headers()
                .get(RATE_LIMIT_REMAINING)
                .and_then(|v| v.to_str().ok()),
            Some("0")
        );

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").peer_addr(peer).to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().contains_key(RETRY_AFTER));
        let body: serde_json::Value = actix_test::read_body_json(second).await;
        assert_eq!(body["error"], TOO_MANY_REQUESTS);
    }
}
