//! Task API handlers
//!
//! Each handler is a single store call. Store failures are logged here and
//! only a short fixed message leaves the process.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error_response;
use crate::api::state::AppState;
use crate::error::TrackerError;
use crate::model::{CreateTaskDto, TaskPatch};

/// DELETE acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Parse the `{id}` path segment
fn parse_task_id(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::debug!(id = raw, "rejecting malformed task id");
        error_response(StatusCode::BAD_REQUEST, "Invalid task id").into_response()
    })
}

/// Map a store error to a response; `fallback` is the fixed 500 message
fn store_error(route: &str, err: TrackerError, fallback: &str) -> Response {
    match err {
        TrackerError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "Task not found").into_response()
        }
        TrackerError::Validation(msg) => {
            tracing::info!(route, %msg, "validation failed");
            error_response(StatusCode::BAD_REQUEST, &msg).into_response()
        }
        TrackerError::InvalidId(_) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid task id").into_response()
        }
        other => {
            tracing::error!(route, error = %other, "store failure");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, fallback).into_response()
        }
    }
}

fn body_error(route: &str, rejection: JsonRejection) -> Response {
    tracing::info!(route, error = %rejection.body_text(), "rejecting request body");
    error_response(StatusCode::BAD_REQUEST, "Invalid task data").into_response()
}

/// GET /api/v1/tasks
pub async fn list_tasks(State(state): State<AppState>) -> Response {
    match state.store.list_tasks().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => store_error("GET /tasks", e, "Failed to fetch tasks"),
    }
}

/// POST /api/v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskDto>, JsonRejection>,
) -> Response {
    let Json(dto) = match payload {
        Ok(body) => body,
        Err(rejection) => return body_error("POST /tasks", rejection),
    };

    match state.store.create_task(dto).await {
        Ok(task) => {
            tracing::info!(id = %task.id, title = %task.title, "task created");
            (StatusCode::CREATED, Json(task)).into_response()
        }
        Err(e) => store_error("POST /tasks", e, "Failed to create task"),
    }
}

/// PUT /api/v1/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> Response {
    let id = match parse_task_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(patch) = match payload {
        Ok(body) => body,
        Err(rejection) => return body_error("PUT /tasks/{id}", rejection),
    };

    match state.store.update_task(id, patch).await {
        Ok(task) => {
            tracing::info!(%id, status = %task.status, "task updated");
            Json(task).into_response()
        }
        Err(e) => store_error("PUT /tasks/{id}", e, "Failed to update task"),
    }
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_task_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.store.delete_task(id).await {
        Ok(()) => {
            tracing::info!(%id, "task deleted");
            Json(DeleteResponse { success: true }).into_response()
        }
        Err(e) => store_error("DELETE /tasks/{id}", e, "Failed to delete task"),
    }
}
