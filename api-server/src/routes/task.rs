//! Task API endpoints
//!
//! Create a task (optionally with an image) and list every stored task.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tg_core::task::Task;
use tg_core::Error;

use crate::error::ApiError;
use crate::payload::FormPayload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub message: String,
    pub item: Task,
}

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub items: Vec<Task>,
}

/// POST /task - Create a task from form or JSON fields plus an optional `file`
///
/// Readiness is checked before a body rejection is reported.
async fn create_task(
    State(state): State<AppState>,
    payload: Result<FormPayload, ApiError>,
) -> Result<Json<CreateTaskResponse>, ApiError> {
    let provisioned = state.provisioned().ok_or(ApiError::NotReady)?;
    let payload = payload?;

    let draft = payload.task_draft();
    let item = state
        .gateway()
        .create_task(provisioned, draft, payload.file)
        .await
        .map_err(|e| match e {
            Error::Table(_) => ApiError::dependency_with_details("Failed to save task", e),
            other => ApiError::from_core(other),
        })?;

    Ok(Json(CreateTaskResponse {
        message: "Task created".to_string(),
        item,
    }))
}

/// GET /tasks - List all tasks
async fn list_tasks(State(state): State<AppState>) -> Result<Json<ListTasksResponse>, ApiError> {
    if !state.is_ready() {
        return Err(ApiError::NotReady);
    }

    let items = state.gateway().list_tasks().await.map_err(|e| {
        tracing::error!("Failed to list tasks: {}", e);
        ApiError::dependency_with_details("Failed to list tasks", e)
    })?;

    Ok(Json(ListTasksResponse { items }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task", post(create_task))
        .route("/tasks", get(list_tasks))
}
