//! Order-maintaining list service for the to-do list.
//!
//! [`TodoList`] keeps every item's `order` distinct:
//! - create appends above the current maximum
//! - a reorder onto an occupied position swaps the two items
//! - delete never renumbers the remaining items
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use todo_list::TodoList;
//! use todo_models::ItemPatch;
//! use todo_persistence::MemoryItemStore;
//!
//! let list = TodoList::new(Arc::new(MemoryItemStore::new()));
//!
//! let milk = list.create("buy milk").unwrap();
//! let dog = list.create("walk dog").unwrap();
//! assert_eq!((milk.order, dog.order), (1, 2));
//!
//! // Move milk to the top; dog takes its old slot
//! list.update(&milk.id, ItemPatch::new().with_order(2)).unwrap();
//! let items = list.list().unwrap();
//! assert_eq!(items[0].id, milk.id);
//! ```

pub mod error;
pub mod list;

pub use error::{ListError, Result};
pub use list::{TodoList, FIRST_ORDER};
