use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::TaskRequest;
use crate::api::AppState;
use crate::domain::{Task, TodoError};
use crate::services::TaskService;

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, TodoError> {
    let pool = state.require_db()?;
    let tasks = TaskService::list_tasks(pool).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Task>, TodoError> {
    let Path(id) = id?;
    let pool = state.require_db()?;
    let task = TaskService::get_task(pool, id).await?;
    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), TodoError> {
    let Json(req) = payload?;
    let pool = state.require_db()?;
    let task = TaskService::create_task(pool, req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<Json<Task>, TodoError> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let pool = state.require_db()?;
    let task = TaskService::update_task(pool, id, req).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, TodoError> {
    let Path(id) = id?;
    let pool = state.require_db()?;
    TaskService::delete_task(pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
