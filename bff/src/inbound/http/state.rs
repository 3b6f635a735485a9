//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, EmployeeService, ShiftService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub employees: Arc<dyn EmployeeService>,
    pub shifts: Arc<dyn ShiftService>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    pub fn new(
        auth: Arc<dyn AuthService>,
        employees: Arc<dyn EmployeeService>,
        shifts: Arc<dyn ShiftService>,
    ) -> Self {
        Self {
            auth,
            employees,
            shifts,
        }
    }
}
