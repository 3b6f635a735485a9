//! Employee administration handlers.
//!
//! ```text
//! GET    /api/admin/employees
//! POST   /api/admin/employees      {"name":"Bob","username":"bob","password":"pw"}
//! PUT    /api/admin/employees/{id} {"name":"Bob","username":"bob","password":""}
//! DELETE /api/admin/employees/{id}
//! GET    /api/admin/weekly-hours
//! ```
//!
//! Role checks are the upstream's concern: the caller's token is forwarded
//! and any 401/403 it answers with is mirrored.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{BearerToken, EmployeeDraft, EmployeeId, EmployeeUpdate, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::upstream_failure;
use crate::inbound::http::state::HttpState;

/// Create/update request body. Every field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Required on create; blank on update keeps the current password.
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<&EmployeeRequest> for EmployeeDraft {
    type Error = Error;

    fn try_from(value: &EmployeeRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.username.as_deref(),
            value.password.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

impl TryFrom<&EmployeeRequest> for EmployeeUpdate {
    type Error = Error;

    fn try_from(value: &EmployeeRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref(),
            value.username.as_deref(),
            value.password.as_deref(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }
}

/// List every employee.
#[get("/employees")]
pub async fn list_employees(
    token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let body = state
        .employees
        .get_all_employees(&token)
        .await
        .map_err(|err| upstream_failure("get employees failed", err))?;
    Ok(HttpResponse::Ok().json(body))
}

/// Create an employee; answers 201 with the upstream record.
#[post("/employees")]
pub async fn create_employee(
    token: BearerToken,
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EmployeeDraft::try_from(&*payload)?;
    let body = state
        .employees
        .create_employee(&token, &draft)
        .await
        .map_err(|err| upstream_failure("create employee failed", err))?;
    Ok(HttpResponse::Created().json(body))
}

/// Update an employee. A blank password leaves the current one unchanged.
#[put("/employees/{id}")]
pub async fn update_employee(
    token: BearerToken,
    state: web::Data<HttpState>,
    path: web::Path<EmployeeId>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<HttpResponse> {
    let update = EmployeeUpdate::try_from(&*payload)?;
    let body = state
        .employees
        .update_employee(&token, path.into_inner(), &update)
        .await
        .map_err(|err| upstream_failure("update employee failed", err))?;
    Ok(HttpResponse::Ok().json(body))
}

/// Delete an employee; answers 204 with no body.
#[delete("/employees/{id}")]
pub async fn delete_employee(
    token: BearerToken,
    state: web::Data<HttpState>,
    path: web::Path<EmployeeId>,
) -> ApiResult<HttpResponse> {
    state
        .employees
        .delete_employee(&token, path.into_inner())
        .await
        .map_err(|err| upstream_failure("delete employee failed", err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Weekly hours for every employee.
#[get("/weekly-hours")]
pub async fn weekly_hours(
    token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let body = state
        .employees
        .get_all_employees_weekly_hours(&token)
        .await
        .map_err(|err| upstream_failure("get weekly hours failed", err))?;
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
