//! Health check handler.

use axum::{extract::State, Json};

use crate::error::Result;
use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /health - Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let items = state.todos.store().count().map_err(todo_list::ListError::from)?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
        items,
    }))
}
