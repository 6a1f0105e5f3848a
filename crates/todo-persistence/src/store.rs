//! The item store seam.

use todo_models::{Item, ItemId, NewItem};

use crate::error::Result;

/// Durable collection of items.
///
/// Every method is atomic for a single document only. Nothing here spans
/// two documents, so callers that touch several items in one operation
/// must coordinate themselves.
pub trait ItemStore: Send + Sync {
    /// Assigns a fresh ID to `new` and persists it.
    fn insert(&self, new: NewItem) -> Result<Item>;

    /// Looks up an item by ID.
    fn get(&self, id: &ItemId) -> Result<Option<Item>>;

    /// Overwrites an existing item.
    ///
    /// Fails with [`PersistenceError::NotFound`](crate::PersistenceError::NotFound)
    /// if the document is gone.
    fn save(&self, item: &Item) -> Result<()>;

    /// Removes an item. Returns false if it did not exist.
    fn remove(&self, id: &ItemId) -> Result<bool>;

    /// Returns all items, highest `order` first.
    fn list_all_descending_by_order(&self) -> Result<Vec<Item>>;

    /// Returns the item with the greatest `order`, if any.
    fn find_max_order(&self) -> Result<Option<Item>> {
        Ok(self.list_all_descending_by_order()?.into_iter().next())
    }

    /// Returns the item whose `order` equals `order`, if any.
    fn find_by_order(&self, order: i64) -> Result<Option<Item>> {
        Ok(self
            .list_all_descending_by_order()?
            .into_iter()
            .find(|item| item.order == order))
    }

    /// Number of stored items.
    fn count(&self) -> Result<usize> {
        Ok(self.list_all_descending_by_order()?.len())
    }
}

/// Sorts by `order` descending; ties (which the list service never produces)
/// fall back to ID so the output is deterministic.
pub fn sort_descending_by_order(items: &mut [Item]) {
    items.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.id.cmp(&b.id)));
}
