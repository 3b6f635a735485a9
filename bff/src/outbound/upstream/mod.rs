//! Upstream REST backend adapter.
//!
//! [`UpstreamHttpClient`] implements the
//! [`crate::domain::ports::UpstreamGateway`] port. The request and response
//! transforms it applies live in [`interceptors`] so they can be tested
//! without a network.

mod http_client;
pub mod interceptors;

pub use http_client::{DEFAULT_TIMEOUT, UpstreamHttpClient};
