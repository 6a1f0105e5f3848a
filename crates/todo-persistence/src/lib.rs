//! Item store for the ordered to-do list.
//!
//! The [`ItemStore`] trait is the only persistence seam the list ordering
//! service sees. Two implementations are provided:
//! - [`JsonItemStore`] - one JSON document per item, written atomically
//!   (write to temp file, then rename)
//! - [`MemoryItemStore`] - in-process map, for tests and ephemeral runs
//!
//! # Example
//!
//! ```no_run
//! use todo_models::{ItemValue, NewItem};
//! use todo_persistence::{ItemStore, JsonItemStore};
//!
//! let store = JsonItemStore::new("/home/user/.todo-list");
//!
//! let item = store
//!     .insert(NewItem {
//!         value: ItemValue::parse("buy milk").unwrap(),
//!         order: 1,
//!     })
//!     .unwrap();
//!
//! let top = store.find_max_order().unwrap();
//! assert_eq!(top.map(|i| i.id), Some(item.id));
//! ```

pub mod atomic;
pub mod error;
pub mod json_store;
pub mod memory_store;
pub mod store;

pub use error::{PersistenceError, Result};
pub use json_store::JsonItemStore;
pub use memory_store::MemoryItemStore;
pub use store::{sort_descending_by_order, ItemStore};
