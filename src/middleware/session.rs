//! Session extractor
//!
//! Handlers that need the signed-in subject (e.g. to stamp an author id)
//! extract [`CurrentSession`] instead of reaching into shared state.

use crate::domain::Session;
use crate::error::AppError;
use crate::server::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};

/// The committed session for the current request.
///
/// Rejects with 401 while the gate is loading or when no session is
/// committed; the role check itself happens earlier, in the role gate
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let snapshot = state.gate.snapshot();
        if snapshot.loading {
            return Err(AppError::Unauthorized("Session not yet known".to_string()));
        }
        snapshot
            .session
            .map(CurrentSession)
            .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))
    }
}
