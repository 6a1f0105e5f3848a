//! REST API for the ordered to-do list.
//!
//! Routes:
//! - `POST /todos` - create an item at the top of the order
//! - `GET /todos` - list items, highest order first
//! - `PATCH /todos/:id` - reorder, complete or rename an item
//! - `DELETE /todos/:id` - remove an item
//! - `GET /health` - liveness and item count
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todo_api::{serve, ApiConfig, AppState};
//! use todo_list::TodoList;
//! use todo_persistence::JsonItemStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::from_env();
//!     let store = JsonItemStore::open(&config.data_dir)?;
//!     let state = AppState::new(config.clone(), TodoList::new(Arc::new(store)));
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
