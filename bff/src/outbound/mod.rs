//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **upstream**: reqwest-backed client for the shift tracker REST backend
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod upstream;
