//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{MockAuthService, MockEmployeeService, MockShiftService};
use crate::inbound::http::routes::{configure, not_found};
use crate::inbound::http::state::HttpState;

/// Mocked ports handed to [`test_app`]; unset expectations fail on call.
#[derive(Default)]
pub struct MockPorts {
    pub auth: MockAuthService,
    pub employees: MockEmployeeService,
    pub shifts: MockShiftService,
}

/// Build the full route table over mocked ports.
pub fn test_app(
    ports: MockPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(ports.auth),
        Arc::new(ports.employees),
        Arc::new(ports.shifts),
    );
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
        .default_service(web::to(not_found))
}
