//! Backend-for-frontend for the shift tracker single-page application.
//!
//! The crate is organised hexagonally:
//! - [`domain`] holds transport-agnostic types, ports, and the services that
//!   compose upstream calls into BFF operations.
//! - [`outbound`] implements the upstream gateway on top of `reqwest`.
//! - [`inbound`] exposes the browser-facing Actix routes.
//! - [`middleware`] carries request-scoped tracing.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Request-scoped trace identifier.
pub use domain::TraceId;
/// Tracing middleware for Actix apps.
pub use middleware::Trace;
