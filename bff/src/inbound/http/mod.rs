//! HTTP inbound adapter exposing the browser-facing REST endpoints.

pub mod admin;
pub mod auth;
pub mod bearer;
pub mod cors;
pub mod error;
pub mod health;
pub mod rate_limit;
pub mod routes;
pub mod shifts;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
