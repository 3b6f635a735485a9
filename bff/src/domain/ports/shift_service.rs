//! Driving port for shift tracking of the calling employee.

use async_trait::async_trait;
use serde_json::Value;

use super::UpstreamError;
use crate::domain::BearerToken;

/// Shift tracking use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftService: Send + Sync {
    /// Open a shift for the token's owner.
    async fn clock_in(&self, token: &BearerToken) -> Result<Value, UpstreamError>;

    /// Close the token owner's open shift.
    async fn clock_out(&self, token: &BearerToken) -> Result<Value, UpstreamError>;

    /// The open shift, or `None` when the upstream reports there is none.
    ///
    /// Only an upstream 404 is read as "no active shift"; every other failure
    /// propagates unchanged.
    async fn get_active_shift(&self, token: &BearerToken) -> Result<Option<Value>, UpstreamError>;

    /// Weekly hours for the token's owner.
    async fn get_weekly_hours(&self, token: &BearerToken) -> Result<Value, UpstreamError>;
}
