//! Document store for items on the local filesystem.

use std::fs;
use std::path::PathBuf;

use todo_models::{Item, ItemId, NewItem};
use tracing::warn;

use crate::atomic::{atomic_write_json, read_json, read_json_optional};
use crate::error::{PersistenceError, Result};
use crate::store::{sort_descending_by_order, ItemStore};

/// Persists each item as its own JSON document:
/// ```text
/// base_path/
/// └── todos/
///     ├── item-3f2a....json
///     └── item-9c1e....json
/// ```
///
/// Queries scan the directory. Listing skips documents that fail to parse,
/// with a warning. Order lookups fail instead, since an item nobody can read
/// may still hold the order being assigned.
#[derive(Debug, Clone)]
pub struct JsonItemStore {
    base_path: PathBuf,
}

impl JsonItemStore {
    /// Creates a store rooted at `base_path`. Directories are created lazily.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates the store and its collection directory up front.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(base_path);
        store.ensure_dirs()?;
        Ok(store)
    }

    /// Returns the collection directory.
    pub fn todos_dir(&self) -> PathBuf {
        self.base_path.join("todos")
    }

    fn item_path(&self, id: &ItemId) -> PathBuf {
        self.todos_dir().join(format!("{}.json", id))
    }

    fn ensure_dirs(&self) -> Result<()> {
        let dir = self.todos_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|source| PersistenceError::DirectoryError { path: dir, source })?;
        }
        Ok(())
    }

    fn load_all(&self, scan: Scan) -> Result<Vec<Item>> {
        let dir = self.todos_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| PersistenceError::ReadError {
            path: dir.clone(),
            source,
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::ReadError {
                path: dir.clone(),
                source,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match (read_json::<Item>(&path), scan) {
                    (Ok(item), _) => items.push(item),
                    (Err(e), Scan::SkipUnreadable) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable item")
                    }
                    (Err(e), Scan::FailOnUnreadable) => {
                        return Err(PersistenceError::CorruptDocument {
                            path,
                            reason: e.to_string(),
                        })
                    }
                }
            }
        }
        Ok(items)
    }
}

#[derive(Debug, Clone, Copy)]
enum Scan {
    SkipUnreadable,
    FailOnUnreadable,
}

impl ItemStore for JsonItemStore {
    fn insert(&self, new: NewItem) -> Result<Item> {
        self.ensure_dirs()?;
        let item = Item::from_new(ItemId::new(), new);
        atomic_write_json(&self.item_path(&item.id), &item)?;
        Ok(item)
    }

    fn get(&self, id: &ItemId) -> Result<Option<Item>> {
        if !id.is_document_safe() {
            return Ok(None);
        }
        read_json_optional(&self.item_path(id))
    }

    fn save(&self, item: &Item) -> Result<()> {
        let path = self.item_path(&item.id);
        if !item.id.is_document_safe() || !path.exists() {
            return Err(PersistenceError::NotFound(item.id.to_string()));
        }
        atomic_write_json(&path, item)
    }

    fn remove(&self, id: &ItemId) -> Result<bool> {
        if !id.is_document_safe() {
            return Ok(false);
        }
        let path = self.item_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|source| PersistenceError::WriteError { path, source })?;
        Ok(true)
    }

    fn list_all_descending_by_order(&self) -> Result<Vec<Item>> {
        let mut items = self.load_all(Scan::SkipUnreadable)?;
        sort_descending_by_order(&mut items);
        Ok(items)
    }

    fn find_max_order(&self) -> Result<Option<Item>> {
        Ok(self
            .load_all(Scan::FailOnUnreadable)?
            .into_iter()
            .max_by_key(|item| item.order))
    }

    fn find_by_order(&self, order: i64) -> Result<Option<Item>> {
        Ok(self
            .load_all(Scan::FailOnUnreadable)?
            .into_iter()
            .find(|item| item.order == order))
    }
}
