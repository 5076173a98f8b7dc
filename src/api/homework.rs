//! Homework endpoints

use crate::domain::{CreateHomeworkInput, Homework};
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkQuery {
    /// Restrict to one class, e.g. `?className=5B`
    pub class_name: Option<String>,
}

/// List homework, newest first, optionally filtered by class
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HomeworkQuery>,
) -> Result<Json<Vec<Homework>>> {
    let homework = state
        .store
        .list_homework(query.class_name.as_deref())
        .await?;
    Ok(Json(homework))
}

/// Assign homework, stamped with the assigning teacher's subject id
pub async fn create(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<CreateHomeworkInput>,
) -> Result<(StatusCode, Json<Homework>)> {
    input.validate()?;
    let homework = Homework::new(input, session.subject_id);
    state.store.insert_homework(&homework).await?;
    Ok((StatusCode::CREATED, Json(homework)))
}

/// Delete a homework assignment
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    state.store.delete_homework(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
