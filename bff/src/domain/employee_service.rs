//! Employee administration service.
//!
//! A thin pass-through: every call attaches the caller's bearer token and
//! forwards to the upstream admin API, returning its JSON untouched.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{EmployeeService, UpstreamError, UpstreamGateway, UpstreamRequest};
use crate::domain::{BearerToken, EmployeeDraft, EmployeeId, EmployeeUpdate};

const EMPLOYEES_PATH: &str = "/api/admin/employees";
const WEEKLY_HOURS_PATH: &str = "/api/admin/weekly-hours";

fn employee_path(id: EmployeeId) -> String {
    format!("{EMPLOYEES_PATH}/{id}")
}

/// [`EmployeeService`] backed by the upstream gateway.
#[derive(Clone)]
pub struct UpstreamEmployeeService<G> {
    gateway: Arc<G>,
}

impl<G> UpstreamEmployeeService<G> {
    /// Create a new service over `gateway`.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

impl<G> UpstreamEmployeeService<G>
where
    G: UpstreamGateway,
{
    async fn fetch(&self, request: UpstreamRequest) -> Result<Value, UpstreamError> {
        Ok(self.gateway.send(request).await?.into_value())
    }
}

#[async_trait]
impl<G> EmployeeService for UpstreamEmployeeService<G>
where
    G: UpstreamGateway,
{
    async fn get_all_employees(&self, token: &BearerToken) -> Result<Value, UpstreamError> {
        self.fetch(UpstreamRequest::get(EMPLOYEES_PATH).with_bearer(token))
            .await
    }

    async fn create_employee(
        &self,
        token: &BearerToken,
        draft: &EmployeeDraft,
    ) -> Result<Value, UpstreamError> {
        self.fetch(
            UpstreamRequest::post(EMPLOYEES_PATH)
                .with_bearer(token)
                .with_json(draft.to_json()),
        )
        .await
    }

    async fn update_employee(
        &self,
        token: &BearerToken,
        id: EmployeeId,
        update: &EmployeeUpdate,
    ) -> Result<Value, UpstreamError> {
        self.fetch(
            UpstreamRequest::put(employee_path(id))
                .with_bearer(token)
                .with_json(update.to_json()),
        )
        .await
    }

    async fn delete_employee(
        &self,
        token: &BearerToken,
        id: EmployeeId,
    ) -> Result<(), UpstreamError> {
        self.gateway
            .send(UpstreamRequest::delete(employee_path(id)).with_bearer(token))
            .await?;
        Ok(())
    }

    async fn get_all_employees_weekly_hours(
        &self,
        token: &BearerToken,
    ) -> Result<Value, UpstreamError> {
        self.fetch(UpstreamRequest::get(WEEKLY_HOURS_PATH).with_bearer(token))
            .await
    }
}

#[cfg(test)]
#[path = "employee_service_tests.rs"]
mod tests;
