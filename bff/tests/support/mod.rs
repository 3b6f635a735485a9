//! Shared harness: the real client, services and middleware stack pointed at
//! a wiremock upstream.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use bff::Trace;
use bff::domain::{UpstreamAuthService, UpstreamEmployeeService, UpstreamShiftService};
use bff::inbound::http::cors::OriginPolicy;
use bff::inbound::http::rate_limit::{RateLimit, RateLimitConfig};
use bff::inbound::http::routes::{configure, not_found};
use bff::inbound::http::state::HttpState;
use bff::outbound::upstream::{DEFAULT_TIMEOUT, UpstreamHttpClient};
use url::Url;

pub const FRONTEND: &str = "http://localhost:5173";

/// Build handler state over a real upstream client for `upstream_uri`.
pub fn http_state(upstream_uri: &str) -> HttpState {
    let base_url = Url::parse(upstream_uri).expect("upstream uri");
    let gateway =
        Arc::new(UpstreamHttpClient::new(base_url, DEFAULT_TIMEOUT).expect("client builds"));
    HttpState::new(
        Arc::new(UpstreamAuthService::new(Arc::clone(&gateway))),
        Arc::new(UpstreamEmployeeService::new(Arc::clone(&gateway))),
        Arc::new(UpstreamShiftService::new(gateway)),
    )
}

/// Base URL of a local port that refuses connections.
///
/// The listener is bound to an ephemeral port and dropped again, so nothing
/// answers there. Pooled wiremock servers stay up after being dropped and
/// cannot stand in for a dead upstream.
pub fn closed_upstream_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("listener address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Initialise the full application with the given request budget.
pub async fn init_app_with_limit(
    upstream_uri: String,
    max_requests: u32,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(&upstream_uri)))
            .configure(configure)
            .default_service(web::to(not_found))
            .wrap(RateLimit::new(RateLimitConfig {
                max_requests,
                window: Duration::from_secs(900),
            }))
            .wrap(OriginPolicy::new([FRONTEND]))
            .wrap(Trace),
    )
    .await
}

/// Initialise the full application with the default request budget.
pub async fn init_app(
    upstream_uri: String,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    init_app_with_limit(upstream_uri, RateLimitConfig::default().max_requests).await
}
