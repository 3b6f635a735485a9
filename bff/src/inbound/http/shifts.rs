//! Shift tracking handlers for the calling employee.
//!
//! ```text
//! POST /api/shifts/clock-in
//! POST /api/shifts/clock-out
//! GET  /api/shifts/active
//! GET  /api/shifts/weekly-hours
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{BearerToken, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::upstream_failure;
use crate::inbound::http::state::HttpState;

/// Message returned when the caller has no open shift.
pub const NO_ACTIVE_SHIFT: &str = "No active shift found";

/// Open a shift; answers 201 with the upstream shift.
#[post("/clock-in")]
pub async fn clock_in(token: BearerToken, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let shift = state
        .shifts
        .clock_in(&token)
        .await
        .map_err(|err| upstream_failure("clock in failed", err))?;
    Ok(HttpResponse::Created().json(shift))
}

/// Close the open shift.
#[post("/clock-out")]
pub async fn clock_out(
    token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let shift = state
        .shifts
        .clock_out(&token)
        .await
        .map_err(|err| upstream_failure("clock out failed", err))?;
    Ok(HttpResponse::Ok().json(shift))
}

/// The open shift, or 404 when there is none.
#[get("/active")]
pub async fn active_shift(
    token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let shift = state
        .shifts
        .get_active_shift(&token)
        .await
        .map_err(|err| upstream_failure("get active shift failed", err))?;
    shift
        .map(|shift| HttpResponse::Ok().json(shift))
        .ok_or_else(|| Error::not_found(NO_ACTIVE_SHIFT))
}

/// Weekly hours for the caller.
#[get("/weekly-hours")]
pub async fn weekly_hours(
    token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let hours = state
        .shifts
        .get_weekly_hours(&token)
        .await
        .map_err(|err| upstream_failure("get weekly hours failed", err))?;
    Ok(HttpResponse::Ok().json(hours))
}

#[cfg(test)]
#[path = "shifts_tests.rs"]
mod tests;
