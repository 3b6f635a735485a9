//! Domain primitives, ports, and services.
//!
//! Purpose: keep everything the BFF knows about its upstream contract free of
//! HTTP framework types. Inbound adapters translate requests into these types
//! and call the driving ports; the services talk to the upstream only through
//! the [`ports::UpstreamGateway`] driven port.
//!
//! Public surface:
//! - Error: client-facing error envelope produced by the route layer.
//! - UpstreamError (re-exported from `ports`): the normalized failure.
//! - LoginCredentials, BearerToken, EmployeeDraft, EmployeeUpdate, EmployeeId.
//! - UpstreamAuthService, UpstreamEmployeeService, UpstreamShiftService.

pub mod auth_service;
pub mod credentials;
pub mod employee;
pub mod employee_service;
pub mod error;
pub mod ports;
pub mod shift_service;
pub mod token;
pub mod trace_id;

pub use self::auth_service::UpstreamAuthService;
pub use self::credentials::{CredentialsValidationError, LoginCredentials};
pub use self::employee::{EmployeeDraft, EmployeeId, EmployeeUpdate, EmployeeValidationError};
pub use self::employee_service::UpstreamEmployeeService;
pub use self::error::Error;
pub use self::ports::UpstreamError;
pub use self::shift_service::UpstreamShiftService;
pub use self::token::BearerToken;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bff::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("Authentication required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
