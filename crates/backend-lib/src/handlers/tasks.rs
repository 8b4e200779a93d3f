// ============================
// crates/backend-lib/src/handlers/tasks.rs
// ============================
//! Task resource handlers. Every query is scoped by the identity the
//! authorization gate resolved; owner ids are never taken from the request.
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics::counter;
use tasktrack_common::{CreateTaskRequest, MessageResponse, Task, UpdateTaskRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::metrics as keys;
use crate::middleware::CurrentUser;
use crate::storage::Storage;
use crate::validation;
use crate::AppState;

fn parse_task_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("id is invalid".to_string()))
}

/// `GET /get-user` — the identity the gate resolved for this request
pub async fn get_user(CurrentUser(user): CurrentUser) -> String {
    user.to_string()
}

/// `GET /get-tasks`
pub async fn get_tasks<S: Storage + Clone + Send + Sync + 'static>(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.storage.tasks_for_user(user).await?))
}

/// `POST /add-task`
pub async fn add_task<S: Storage + Clone + Send + Sync + 'static>(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_task_title(&req.title)?;

    let task = Task::new(user, req.title);
    state.storage.insert_task(&task).await?;

    counter!(keys::TASK_CREATED).increment(1);

    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /edit-task/{id}`
pub async fn edit_task<S: Storage + Clone + Send + Sync + 'static>(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let id = parse_task_id(&id)?;

    match state.storage.update_task(id, user, req.title).await? {
        Some(task) => Ok(Json(task)),
        None => Err(AppError::NotFound("Task not found".to_string())),
    }
}

/// `DELETE /delete-task/{id}`
pub async fn delete_task<S: Storage + Clone + Send + Sync + 'static>(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_task_id(&id)?;

    if state.storage.delete_task(id, user).await? {
        counter!(keys::TASK_DELETED).increment(1);
        Ok(Json(MessageResponse::new("Task deleted successfully")))
    } else {
        Err(AppError::NotFound("Task not found".to_string()))
    }
}
