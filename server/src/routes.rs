//! Handlers for the list endpoints.

use crate::AppState;
use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use todos_shared::{MessageResponse, NewTask, Task, TaskId};

/// Routes relative to the configured prefix.
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/{id}", delete(delete_todo))
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let todos = state
        .store()
        .list()
        .await
        .map_err(ApiError::store("Error fetching todos"))?;
    tracing::debug!(count = todos.len(), "listed todos");
    Ok(Json(todos))
}

async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(new_task) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let created = state
        .store()
        .create(new_task)
        .await
        .map_err(ApiError::store("Error creating todo"))?;
    tracing::info!(id = %created.id, "created todo");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id: TaskId = id.parse().map_err(|err| {
        tracing::debug!(%err, "rejected delete");
        ApiError::BadRequest("Invalid todo id".into())
    })?;

    let removed = state
        .store()
        .delete(&id)
        .await
        .map_err(ApiError::store("Error deleting todo"))?;
    if !removed {
        return Err(ApiError::NotFound("Todo not found"));
    }

    tracing::info!(%id, "deleted todo");
    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}
