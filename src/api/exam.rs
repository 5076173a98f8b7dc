//! Exam timetable endpoints

use crate::domain::{ExamTimetable, PutExamTimetableInput};
use crate::error::{AppError, Result};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// List all exam timetables
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ExamTimetable>>> {
    Ok(Json(state.store.list_exam_timetables().await?))
}

/// Fetch one class's exam timetable
pub async fn get_one(
    State(state): State<AppState>,
    Path(class_name): Path<String>,
) -> Result<Json<ExamTimetable>> {
    state
        .store
        .get_exam_timetable(&class_name)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No exam timetable for class {class_name}")))
}

/// Publish (or replace) an exam timetable
pub async fn put(
    State(state): State<AppState>,
    Json(input): Json<PutExamTimetableInput>,
) -> Result<(StatusCode, Json<ExamTimetable>)> {
    input.validate()?;
    let timetable = ExamTimetable::new(input);
    state.store.put_exam_timetable(&timetable).await?;
    Ok((StatusCode::CREATED, Json(timetable)))
}
