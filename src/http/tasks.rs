//! Task endpoints: create, list, retrieve, and timer actions.
//!
//! Every query is scoped to the authenticated caller; a task owned by
//! another user is indistinguishable from a missing one (404).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::types::{TaskInput, TaskView};

/// `POST /tasks`. The owner is always the caller, never taken from the body.
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<TaskInput>,
) -> ApiResult<(StatusCode, Json<TaskView>)> {
    if input.title.trim().is_empty() {
        return Err(ApiError::missing_field("title"));
    }

    let task = state.db.create_task(user.id, input)?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

/// `GET /tasks`. Lists the caller's tasks in insertion order.
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<TaskView>>> {
    let tasks = state.db.list_tasks(user.id)?;
    Ok(Json(tasks.into_iter().map(TaskView::from).collect()))
}

/// `GET /tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<TaskView>> {
    let task = state
        .db
        .get_task(task_id, user.id)?
        .ok_or_else(|| ApiError::task_not_found(task_id))?;
    Ok(Json(task.into()))
}

/// `POST /tasks/{id}/start`. Unconditional: restarting overwrites the
/// previous start instant.
pub async fn start_timer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<TaskView>> {
    let task = state
        .db
        .start_timer(task_id, user.id)?
        .ok_or_else(|| ApiError::task_not_found(task_id))?;
    Ok(Json(task.into()))
}

/// `POST /tasks/{id}/stop`. There is no precondition that the timer was
/// started.
pub async fn stop_timer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<TaskView>> {
    let task = state
        .db
        .stop_timer(task_id, user.id)?
        .ok_or_else(|| ApiError::task_not_found(task_id))?;
    Ok(Json(task.into()))
}
