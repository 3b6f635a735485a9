//! Shift tracking service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::BearerToken;
use crate::domain::ports::{ShiftService, UpstreamError, UpstreamGateway, UpstreamRequest};

const CLOCK_IN_PATH: &str = "/api/shifts/clock-in";
const CLOCK_OUT_PATH: &str = "/api/shifts/clock-out";
const ACTIVE_PATH: &str = "/api/shifts/active";
const WEEKLY_HOURS_PATH: &str = "/api/shifts/weekly-hours";

/// [`ShiftService`] backed by the upstream gateway.
#[derive(Clone)]
pub struct UpstreamShiftService<G> {
    gateway: Arc<G>,
}

impl<G> UpstreamShiftService<G> {
    /// Create a new service over `gateway`.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

impl<G> UpstreamShiftService<G>
where
    G: UpstreamGateway,
{
    async fn clock(&self, path: &str, token: &BearerToken) -> Result<Value, UpstreamError> {
        let request = UpstreamRequest::post(path)
            .with_bearer(token)
            .with_json(Value::Object(Map::new()));
        Ok(self.gateway.send(request).await?.into_value())
    }
}

#[async_trait]
impl<G> ShiftService for UpstreamShiftService<G>
where
    G: UpstreamGateway,
{
    async fn clock_in(&self, token: &BearerToken) -> Result<Value, UpstreamError> {
        self.clock(CLOCK_IN_PATH, token).await
    }

    async fn clock_out(&self, token: &BearerToken) -> Result<Value, UpstreamError> {
        self.clock(CLOCK_OUT_PATH, token).await
    }

    async fn get_active_shift(&self, token: &BearerToken) -> Result<Option<Value>, UpstreamError> {
        let request = UpstreamRequest::get(ACTIVE_PATH).with_bearer(token);
        match self.gateway.send(request).await {
            Ok(response) => Ok(response.body.filter(|body| !body.is_null())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_weekly_hours(&self, token: &BearerToken) -> Result<Value, UpstreamError> {
        let request = UpstreamRequest::get(WEEKLY_HOURS_PATH).with_bearer(token);
        Ok(self.gateway.send(request).await?.into_value())
    }
}

#[cfg(test)]
#[path = "shift_service_tests.rs"]
mod tests;
