//! Application state shared across handlers.

use std::sync::Arc;

use todo_list::TodoList;
use todo_persistence::MemoryItemStore;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// List ordering service.
    pub todos: TodoList,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(config: ApiConfig, todos: TodoList) -> Self {
        Self {
            config: Arc::new(config),
            todos,
        }
    }

    /// State over an empty in-memory store.
    pub fn in_memory(config: ApiConfig) -> Self {
        Self::new(config, TodoList::new(Arc::new(MemoryItemStore::new())))
    }
}
