//! Bearer token extraction for protected routes.
//!
//! Handlers that take a [`BearerToken`] argument reject requests without an
//! `Authorization: Bearer <token>` header before any body is inspected, so it
//! should be the first extractor in the handler signature.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{BearerToken, Error};

/// Scheme prefix expected on the authorization header.
const BEARER_PREFIX: &str = "Bearer ";
/// Message returned when no usable token was supplied.
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-sensitively and the remainder is taken verbatim.
#[must_use]
pub fn token_from_header(value: &str) -> Option<BearerToken> {
    value.strip_prefix(BEARER_PREFIX).and_then(BearerToken::new)
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(token_from_header);
        ready(token.ok_or_else(|| Error::unauthorized(AUTHENTICATION_REQUIRED)))
    }
}
