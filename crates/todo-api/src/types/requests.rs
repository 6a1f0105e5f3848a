//! Request DTOs for the API.

use serde::Deserialize;
use serde_json::Value;
use todo_models::ItemPatch;

/// Create todo request.
///
/// `value` stays untyped so a missing or non-string value is reported as a
/// validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Item text.
    #[serde(default)]
    pub value: Option<Value>,
}

/// Update todo request. Any subset of fields may be supplied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New position.
    #[serde(default)]
    pub order: Option<i64>,
    /// Completion flag.
    #[serde(default)]
    pub done: Option<bool>,
    /// Replacement text.
    #[serde(default)]
    pub value: Option<String>,
}

impl From<UpdateTodoRequest> for ItemPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        ItemPatch {
            order: req.order,
            done: req.done,
            value: req.value,
        }
    }
}
