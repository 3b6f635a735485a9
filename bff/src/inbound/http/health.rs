//! Health endpoints: a descriptive status document for humans plus liveness
//! and readiness checks for orchestration and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Readiness flag plus the upstream URL shown on the status document.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    backend_url: String,
}

impl HealthState {
    /// Live but not yet ready; `create_server` flips readiness after bind.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            ready: AtomicBool::new(false),
            backend_url: backend_url.into(),
        }
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Upstream base URL reported by the status document.
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_str()
    }

    fn status_response(ok: bool) -> HttpResponse {
        let mut response = if ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport<'a> {
    /// Always `"ok"` while the process serves requests.
    pub status: &'static str,
    /// Human-readable banner.
    pub message: &'static str,
    /// Upstream base URL without a trailing slash.
    pub backend_url: &'a str,
    /// RFC 3339 time of the response.
    pub timestamp: String,
}

/// Status document naming the upstream this instance proxies to.
#[get("/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthReport {
            status: "ok",
            message: "Shift Tracker BFF is running",
            backend_url: state.backend_url(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
}

/// Readiness check: 200 once bound, 503 before.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::status_response(state.is_ready())
}

/// Liveness check: 200 whenever the process can answer at all.
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    HealthState::status_response(true)
}
