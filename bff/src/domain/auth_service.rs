//! Login service forwarding credentials to the upstream.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::domain::LoginCredentials;
use crate::domain::ports::{AuthService, UpstreamError, UpstreamGateway, UpstreamRequest};

const LOGIN_PATH: &str = "/api/auth/login";

/// [`AuthService`] backed by the upstream gateway.
#[derive(Clone)]
pub struct UpstreamAuthService<G> {
    gateway: Arc<G>,
}

impl<G> UpstreamAuthService<G> {
    /// Create a new service over `gateway`.
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G> AuthService for UpstreamAuthService<G>
where
    G: UpstreamGateway,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<Value, UpstreamError> {
        let request = UpstreamRequest::post(LOGIN_PATH).with_json(json!({
            "username": credentials.username(),
            "password": credentials.password(),
        }));
        let response = self.gateway.send(request).await?;
        Ok(response.into_value())
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
