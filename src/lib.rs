//! Campus Core - School Management Service Backend
//!
//! This crate provides the backend for the campus portals (admin, principal,
//! teacher, student). Its center is the session/role gate: a typed reflection
//! of the external identity provider's session, enriched with the subject's
//! profile document from the external document store, enforced once at the
//! routing layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod provider;
pub mod server;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
