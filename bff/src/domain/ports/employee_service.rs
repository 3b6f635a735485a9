//! Driving port for employee administration.

use async_trait::async_trait;
use serde_json::Value;

use super::UpstreamError;
use crate::domain::{BearerToken, EmployeeDraft, EmployeeId, EmployeeUpdate};

/// Employee administration use-cases.
///
/// All policy (field rules, duplicate usernames, role checks) lives upstream;
/// implementations only attach the caller's token and forward.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// List every employee.
    async fn get_all_employees(&self, token: &BearerToken) -> Result<Value, UpstreamError>;

    /// Create an employee and return the upstream record.
    async fn create_employee(
        &self,
        token: &BearerToken,
        draft: &EmployeeDraft,
    ) -> Result<Value, UpstreamError>;

    /// Replace an employee's details and return the upstream record.
    async fn update_employee(
        &self,
        token: &BearerToken,
        id: EmployeeId,
        update: &EmployeeUpdate,
    ) -> Result<Value, UpstreamError>;

    /// Delete an employee. Succeeds without a body.
    async fn delete_employee(&self, token: &BearerToken, id: EmployeeId)
    -> Result<(), UpstreamError>;

    /// Weekly hours for every employee.
    async fn get_all_employees_weekly_hours(
        &self,
        token: &BearerToken,
    ) -> Result<Value, UpstreamError>;
}
