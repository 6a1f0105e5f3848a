//! Core data models for the ordered to-do list.
//!
//! This crate provides the types shared by the store, the list ordering
//! service and the HTTP layer:
//! - [`Item`] - a persisted to-do entry with its position key
//! - [`ItemId`] - opaque identifier assigned by the store
//! - [`ItemValue`] - validated item text (1-50 characters)
//! - [`ItemPatch`] - partial update of an item

pub mod error;
pub mod ids;
pub mod item;
pub mod value;

pub use error::ValidationError;
pub use ids::ItemId;
pub use item::{Item, ItemPatch, NewItem};
pub use value::{ItemValue, MAX_VALUE_LEN, MIN_VALUE_LEN};
