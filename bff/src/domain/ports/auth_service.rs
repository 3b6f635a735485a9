//! Driving port for the login use-case.
//!
//! Inbound adapters call this port to exchange credentials for the upstream's
//! token and user profile without knowing how the upstream is reached.

use async_trait::async_trait;
use serde_json::Value;

use super::UpstreamError;
use crate::domain::LoginCredentials;

/// Authentication use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Forward credentials to the upstream and return its body unmodified.
    ///
    /// The body is expected to carry `token`, `id`, `name`, `username` and
    /// `role`, but it is not inspected.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Value, UpstreamError>;
}
