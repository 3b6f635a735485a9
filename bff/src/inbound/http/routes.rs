//! Route table for the browser-facing API.
//!
//! ```text
//! POST   /api/auth/login
//! GET    /api/admin/employees
//! POST   /api/admin/employees
//! PUT    /api/admin/employees/{id}
//! DELETE /api/admin/employees/{id}
//! GET    /api/admin/weekly-hours
//! POST   /api/shifts/clock-in
//! POST   /api/shifts/clock-out
//! GET    /api/shifts/active
//! GET    /api/shifts/weekly-hours
//! ```

use actix_web::{HttpResponse, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::{admin, auth, shifts};

/// Message for requests that match no route.
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Register extractor configuration and every API scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bff::inbound::http::routes::{configure, not_found};
///
/// let _app = App::new()
///     .configure(configure)
///     .default_service(web::to(not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(web::scope("/api/auth").service(auth::login))
        .service(
            web::scope("/api/admin")
                .service(admin::list_employees)
                .service(admin::create_employee)
                .service(admin::update_employee)
                .service(admin::delete_employee)
                .service(admin::weekly_hours),
        )
        .service(
            web::scope("/api/shifts")
                .service(shifts::clock_in)
                .service(shifts::clock_out)
                .service(shifts::active_shift)
                .service(shifts::weekly_hours),
        );
}

/// Fallback handler answering 404 for unmatched routes.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(ROUTE_NOT_FOUND))
}
