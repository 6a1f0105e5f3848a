//! Item types for the to-do list.
//!
//! An item is created with a fresh `order` above every existing one, may be
//! updated any number of times and is removed permanently on delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::value::ItemValue;

/// A single to-do entry with text, completion state and position.
///
/// Serialized as `{ "id", "value", "order", "doneAt" }`, both on disk and on
/// the wire. `doneAt` is `null` while the item is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned by the store.
    pub id: ItemId,

    /// Item text.
    pub value: ItemValue,

    /// Position key. Higher renders earlier.
    pub order: i64,

    /// When the item was completed.
    #[serde(default)]
    pub done_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Builds an item from a store-assigned ID and the insert payload.
    pub fn from_new(id: ItemId, new: NewItem) -> Self {
        Self {
            id,
            value: new.value,
            order: new.order,
            done_at: None,
        }
    }

    /// Returns true if the item has been completed.
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }

    /// Marks the item done at `now`, or clears completion.
    pub fn set_done(&mut self, done: bool, now: DateTime<Utc>) {
        self.done_at = if done { Some(now) } else { None };
    }
}

/// Payload for inserting an item; the store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub value: ItemValue,
    pub order: i64,
}

/// Partial update of an item. Every field is independent and optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// Requested position. Swaps with the current holder, if any.
    pub order: Option<i64>,

    /// `true` marks done now, `false` clears completion.
    pub done: Option<bool>,

    /// Replacement text. Ignored when empty.
    pub value: Option<String>,
}

impl ItemPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the requested order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the completion flag.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = Some(done);
        self
    }

    /// Sets the replacement text.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}
