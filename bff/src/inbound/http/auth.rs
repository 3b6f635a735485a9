//! Authentication handlers.
//!
//! ```text
//! POST /api/auth/login {"username":"alice","password":"password"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::upstream_failure;
use crate::inbound::http::state::HttpState;

const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Login request body for `POST /api/auth/login`.
///
/// Both fields are optional at the wire level so that missing values produce
/// the envelope error rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Plain-text password, forwarded once and never logged.
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        let username = value.username.as_deref().unwrap_or_default();
        let password = value.password.as_deref().unwrap_or_default();
        Self::try_from_parts(username, password)
            .map_err(|_| Error::invalid_request(CREDENTIALS_REQUIRED))
    }
}

/// Exchange credentials for the upstream's token and profile.
///
/// The upstream body is returned unmodified.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&*payload)?;
    let body = state
        .auth
        .login(&credentials)
        .await
        .map_err(|err| upstream_failure("login failed", err))?;
    Ok(HttpResponse::Ok().json(body))
}
