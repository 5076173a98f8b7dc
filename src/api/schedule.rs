//! Class schedule endpoints

use crate::domain::{ClassSchedule, PutScheduleInput};
use crate::error::{AppError, Result};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// List all class schedules
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ClassSchedule>>> {
    Ok(Json(state.store.list_schedules().await?))
}

/// Fetch one class schedule
pub async fn get_one(
    State(state): State<AppState>,
    Path(class_name): Path<String>,
) -> Result<Json<ClassSchedule>> {
    state
        .store
        .get_schedule(&class_name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No schedule for class {class_name}")))
}

/// Publish (or replace) a class schedule
pub async fn put(
    State(state): State<AppState>,
    Json(input): Json<PutScheduleInput>,
) -> Result<(StatusCode, Json<ClassSchedule>)> {
    input.validate()?;
    let schedule = ClassSchedule::new(input);
    state.store.put_schedule(&schedule).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}
