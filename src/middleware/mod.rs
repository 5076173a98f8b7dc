//! HTTP middleware for Campus Core
//!
//! This module provides the routing-layer pieces of the session/role gate:
//! - the `role_gate` middleware enforcing role-scoped path prefixes
//! - the `CurrentSession` extractor for handlers that need the session

pub mod role_gate;
pub mod session;

pub use role_gate::{authorize, role_gate_middleware, GateDecision};
pub use session::CurrentSession;
