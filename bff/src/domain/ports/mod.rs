//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`AuthService`], [`EmployeeService`], [`ShiftService`]) are
//! what the HTTP adapter calls. The driven port ([`UpstreamGateway`]) is what
//! the domain services call to reach the upstream backend.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod employee_service;
mod shift_service;
mod upstream_gateway;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::AuthService;
#[cfg(test)]
pub use employee_service::MockEmployeeService;
pub use employee_service::EmployeeService;
#[cfg(test)]
pub use shift_service::MockShiftService;
pub use shift_service::ShiftService;
#[cfg(test)]
pub use upstream_gateway::MockUpstreamGateway;
pub use upstream_gateway::{
    AUTHORIZATION, BACKEND_ERROR_FALLBACK, BACKEND_UNAVAILABLE, NormalizedFailure,
    REQUEST_SETUP_ERROR, UpstreamError, UpstreamGateway, UpstreamMethod, UpstreamRequest,
    UpstreamResponse,
};
