//! Privileged account administration

use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{info, warn};

/// `DELETE /admin/accounts/{subject_id}`
///
/// Invokes the identity provider's privileged delete-account operation.
/// Provider errors are propagated to the caller with the provider's status
/// code and message; there is no retry. The profile document is removed
/// best-effort afterwards.
pub async fn delete_account(
    State(state): State<AppState>,
    Path(subject_id): Path<String>,
) -> Result<StatusCode> {
    state.provider.delete_account(&subject_id).await?;

    if let Err(err) = state.store.delete_profile(&subject_id).await {
        warn!(subject_id, %err, "account deleted but profile cleanup failed");
    }

    info!(subject_id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
