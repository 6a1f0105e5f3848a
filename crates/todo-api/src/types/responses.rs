//! Response DTOs for the API.

use serde::Serialize;
use todo_models::Item;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Number of stored items.
    pub items: usize,
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub todo: Item,
}

/// Body of `GET /todos`, highest order first.
#[derive(Debug, Clone, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Item>,
}

/// Empty acknowledgement, serialized as `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}

/// Error body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}
