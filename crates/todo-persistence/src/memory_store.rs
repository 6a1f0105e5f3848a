//! In-memory item store.

use std::collections::HashMap;
use std::sync::RwLock;

use todo_models::{Item, ItemId, NewItem};

use crate::error::{PersistenceError, Result};
use crate::store::{sort_descending_by_order, ItemStore};

/// Item store backed by a `HashMap` behind an `RwLock`.
///
/// Nothing survives the process. Used by tests and `--in-memory` runs.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<ItemId, Item>>,
}

impl MemoryItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> PersistenceError {
    PersistenceError::LockPoisoned(e.to_string())
}

impl ItemStore for MemoryItemStore {
    fn insert(&self, new: NewItem) -> Result<Item> {
        let item = Item::from_new(ItemId::new(), new);
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    fn get(&self, id: &ItemId) -> Result<Option<Item>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(id).cloned())
    }

    fn save(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        match items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(())
            }
            None => Err(PersistenceError::NotFound(item.id.to_string())),
        }
    }

    fn remove(&self, id: &ItemId) -> Result<bool> {
        let mut items = self.items.write().map_err(poisoned)?;
        Ok(items.remove(id).is_some())
    }

    fn list_all_descending_by_order(&self) -> Result<Vec<Item>> {
        let items = self.items.read().map_err(poisoned)?;
        let mut all: Vec<Item> = items.values().cloned().collect();
        sort_descending_by_order(&mut all);
        Ok(all)
    }

    fn find_max_order(&self) -> Result<Option<Item>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.values().max_by_key(|item| item.order).cloned())
    }

    fn find_by_order(&self, order: i64) -> Result<Option<Item>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.values().find(|item| item.order == order).cloned())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.items.read().map_err(poisoned)?.len())
    }
}
