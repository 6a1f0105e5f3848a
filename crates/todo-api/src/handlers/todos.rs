//! Todo handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use todo_models::{ItemId, ItemValue};

use crate::error::Result;
use crate::state::AppState;
use crate::types::{
    CreateTodoRequest, EmptyResponse, TodoListResponse, TodoResponse, UpdateTodoRequest,
};

/// GET /todos - List all todos, highest order first.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoListResponse>> {
    let todos = state.todos.list()?;
    Ok(Json(TodoListResponse { todos }))
}

/// POST /todos - Create a todo above every existing one.
pub async fn create_todo(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>)> {
    let Json(req) = body?;
    let value = ItemValue::from_json(req.value.as_ref())?;

    let todo = state.todos.create(value.into_inner())?;

    Ok((StatusCode::CREATED, Json(TodoResponse { todo })))
}

/// PATCH /todos/:id - Reorder, complete or rename a todo.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<EmptyResponse>> {
    let Json(req) = body?;
    state.todos.update(&ItemId::from(id), req.into())?;
    Ok(Json(EmptyResponse {}))
}

/// DELETE /todos/:id - Remove a todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmptyResponse>> {
    state.todos.delete(&ItemId::from(id))?;
    Ok(Json(EmptyResponse {}))
}
