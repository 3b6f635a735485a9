//! BFF entry-point: loads settings, wires the upstream client and serves the
//! browser-facing API.

mod server;

use actix_web::web;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bff::inbound::http::health::HealthState;
use server::{BffSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = BffSettings::load_with_args(std::env::args_os())
        .and_then(|settings| settings.server_config())
        .map_err(|e| {
            error!(error = %e, "invalid configuration");
            std::io::Error::other(e)
        })?;

    let backend_url = config.upstream_url().as_str().trim_end_matches('/').to_owned();
    let health_state = web::Data::new(HealthState::new(backend_url));
    let server = create_server(health_state, config)?;
    server.await
}
