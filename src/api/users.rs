//! User listing for the admin and principal portals

use crate::domain::{Profile, Role};
use crate::error::Result;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    /// `where role == X` filter, e.g. `?role=teacher`
    pub role: Role,
}

/// List profiles with a given role
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<Profile>>> {
    Ok(Json(state.store.list_profiles_by_role(query.role).await?))
}
