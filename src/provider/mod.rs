//! Identity provider access
//!
//! The identity provider is an external hosted collaborator. It is consumed
//! for credential sign-in, sign-out, account creation, and the privileged
//! delete-account operation; it pushes session-change notifications back into
//! the service through the webhook in `api::session_event`.

pub mod client;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use client::HttpIdentityProvider;

/// Result of a credential sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInSubject {
    pub subject_id: String,
    pub email: String,
    /// The provider's own session token; held by the client, not this service
    pub session_token: String,
}

/// Result of account creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
    pub subject_id: String,
    pub email: String,
}

/// Operations consumed from the external identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in with credentials. Bad credentials surface as a provider error
    /// carrying the provider's status code.
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInSubject>;

    /// End the subject's provider session
    async fn sign_out(&self, subject_id: &str) -> Result<()>;

    /// Create a new account
    async fn create_account(&self, email: &str, password: &str) -> Result<CreatedAccount>;

    /// Privileged account deletion. Errors are propagated with the provider's
    /// status and message; there is no retry.
    async fn delete_account(&self, subject_id: &str) -> Result<()>;
}
