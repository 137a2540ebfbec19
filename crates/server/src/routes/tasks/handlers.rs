use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Json as ResponseJson,
};
use db::models::task::Task;

use super::dto::{CreateTaskRequest, TaskQuery, UpdateTaskRequest};
use crate::{AppState, error::ApiError, extract::JsonBody};

pub async fn get_tasks(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ResponseJson<Vec<Task>>, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Ignoring unparseable query string");
            Vec::new()
        }
    };
    let completed = TaskQuery::from_pairs(pairs).completed_filter();
    let tasks = Task::find_all(&state.db().pool, completed).await?;
    tracing::debug!(count = tasks.len(), ?completed, "Listing tasks");
    Ok(ResponseJson(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    task_id: Result<Path<i64>, PathRejection>,
) -> Result<ResponseJson<Task>, ApiError> {
    let Path(task_id) = task_id?;
    let task = Task::find_by_id(&state.db().pool, task_id)
        .await?
        .ok_or_else(ApiError::task_not_found)?;
    Ok(ResponseJson(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, ResponseJson<Task>), ApiError> {
    let data = payload.validate()?;

    tracing::debug!("Creating task '{}'", data.title);
    let task = Task::create(&state.db().pool, &data).await?;

    tracing::info!(task_id = task.id, "Created task");
    Ok((StatusCode::CREATED, ResponseJson(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    task_id: Result<Path<i64>, PathRejection>,
    JsonBody(payload): JsonBody<UpdateTaskRequest>,
) -> Result<ResponseJson<Task>, ApiError> {
    let Path(task_id) = task_id?;
    let data = payload.validate()?;

    let task = Task::update(&state.db().pool, task_id, &data)
        .await?
        .ok_or_else(|| {
            tracing::warn!(task_id, "Task not found for update");
            ApiError::task_not_found()
        })?;

    tracing::info!(task_id, "Updated task");
    Ok(ResponseJson(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    task_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(task_id) = task_id?;

    if !Task::delete(&state.db().pool, task_id).await? {
        tracing::warn!(task_id, "Task not found for delete");
        return Err(ApiError::task_not_found());
    }

    tracing::info!(task_id, "Deleted task");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_task(
    State(state): State<AppState>,
    task_id: Result<Path<i64>, PathRejection>,
) -> Result<ResponseJson<Task>, ApiError> {
    let Path(task_id) = task_id?;

    let task = Task::toggle_completed(&state.db().pool, task_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(task_id, "Task not found for toggle");
            ApiError::task_not_found()
        })?;

    tracing::info!(task_id, completed = task.completed, "Toggled task");
    Ok(ResponseJson(task))
}
