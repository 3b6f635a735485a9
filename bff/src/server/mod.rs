//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::BffSettings;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use tracing::info;

use bff::Trace;
use bff::domain::{UpstreamAuthService, UpstreamEmployeeService, UpstreamShiftService};
use bff::inbound::http::cors::OriginPolicy;
use bff::inbound::http::health::{HealthState, health, live, ready};
use bff::inbound::http::rate_limit::RateLimit;
use bff::inbound::http::routes::{configure, not_found};
use bff::inbound::http::state::HttpState;
use bff::outbound::upstream::UpstreamHttpClient;

/// Wire the upstream client into the three domain services.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let gateway = Arc::new(
        UpstreamHttpClient::new(config.upstream_url.clone(), config.upstream_timeout)
            .map_err(|e| std::io::Error::other(format!("failed to build upstream client: {e}")))?,
    );
    Ok(HttpState::new(
        Arc::new(UpstreamAuthService::new(Arc::clone(&gateway))),
        Arc::new(UpstreamEmployeeService::new(Arc::clone(&gateway))),
        Arc::new(UpstreamShiftService::new(gateway)),
    ))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// One upstream client and one rate limiter are created here and shared by
/// every worker.
///
/// # Errors
/// Propagates [`std::io::Error`] when the upstream client cannot be built or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let origin_policy = OriginPolicy::new([config.frontend_url.as_str()]);
    let rate_limit = RateLimit::new(config.rate_limit);

    info!(
        bind_addr = %config.bind_addr,
        upstream = %config.upstream_url,
        frontend = %config.frontend_url,
        "starting shift tracker BFF"
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .service(health)
            .service(ready)
            .service(live)
            .configure(configure)
            .default_service(web::to(not_found))
            .wrap(rate_limit.clone())
            .wrap(origin_policy.clone())
            .wrap(Trace)
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
