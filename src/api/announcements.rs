//! Announcement endpoints, shared by every portal that can read them

use crate::domain::{Announcement, CreateAnnouncementInput};
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// List announcements, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(state.store.list_announcements().await?))
}

/// Post an announcement, stamped with the current session's subject id
pub async fn create(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<CreateAnnouncementInput>,
) -> Result<(StatusCode, Json<Announcement>)> {
    input.validate()?;
    let announcement = Announcement::new(input, session.subject_id);
    state.store.insert_announcement(&announcement).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Delete an announcement
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.store.delete_announcement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
