//! TodoList - create, list, reorder and delete items without duplicate orders.
//!
//! The only ways an `order` changes are:
//! - create, which takes `max + 1`
//! - update, which swaps with whichever item already holds the target
//!
//! Neither can introduce a duplicate, so the invariant holds by construction
//! as long as mutations do not interleave. A per-list write guard
//! serializes create, update and delete within the process.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use todo_models::{Item, ItemId, ItemPatch, ItemValue, NewItem, ValidationError};
use todo_persistence::ItemStore;
use tracing::{debug, info};

use crate::error::{ListError, Result};

/// Order assigned to the first item in an empty store.
pub const FIRST_ORDER: i64 = 1;

/// List ordering service over an injected [`ItemStore`].
///
/// Holds no item state of its own. Cloning shares the store and the guard.
#[derive(Clone)]
pub struct TodoList {
    store: Arc<dyn ItemStore>,
    write_guard: Arc<Mutex<()>>,
}

impl TodoList {
    /// Creates a list service over `store`.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// The guard protects no data, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a new item above every existing one.
    ///
    /// # Errors
    /// `Validation` if `value` is empty or longer than 50 characters, or if
    /// the current top item already sits at `i64::MAX`. `Store` if
    /// persistence fails.
    pub fn create(&self, value: impl Into<String>) -> Result<Item> {
        let value = ItemValue::parse(value)?;

        let _guard = self.lock();
        let order = match self.store.find_max_order()? {
            Some(top) => top
                .order
                .checked_add(1)
                .ok_or(ValidationError::NoOrderAbove(top.order))?,
            None => FIRST_ORDER,
        };

        let item = self.store.insert(NewItem { value, order })?;
        info!(id = %item.id, order = item.order, "created todo");
        Ok(item)
    }

    /// Returns every item, highest `order` first.
    pub fn list(&self) -> Result<Vec<Item>> {
        Ok(self.store.list_all_descending_by_order()?)
    }

    /// Applies a partial update.
    ///
    /// When `patch.order` is held by another item, that item receives the
    /// target's previous order and is written first. If the target write then
    /// fails, the partner's write stays applied and `Store` is returned;
    /// callers should re-read before retrying.
    ///
    /// # Errors
    /// `NotFound` if `id` does not resolve, `Validation` if a non-empty
    /// replacement value is out of bounds, `Store` if persistence fails.
    pub fn update(&self, id: &ItemId, patch: ItemPatch) -> Result<()> {
        let value = patch
            .value
            .filter(|v| !v.is_empty())
            .map(ItemValue::parse)
            .transpose()?;

        let _guard = self.lock();
        let mut item = self
            .store
            .get(id)?
            .ok_or_else(|| ListError::NotFound(id.to_string()))?;

        if let Some(order) = patch.order {
            if order != item.order {
                if let Some(mut holder) = self.store.find_by_order(order)? {
                    if holder.id != item.id {
                        debug!(
                            id = %item.id,
                            other = %holder.id,
                            from = item.order,
                            to = order,
                            "swapping todo order"
                        );
                        holder.order = item.order;
                        self.store.save(&holder)?;
                    }
                }
                item.order = order;
            }
        }

        if let Some(done) = patch.done {
            item.set_done(done, Utc::now());
        }

        if let Some(value) = value {
            item.value = value;
        }

        self.store.save(&item)?;
        info!(id = %item.id, order = item.order, done = item.is_done(), "updated todo");
        Ok(())
    }

    /// Removes an item permanently. Remaining orders are left as they are.
    ///
    /// # Errors
    /// `NotFound` if `id` does not resolve.
    pub fn delete(&self, id: &ItemId) -> Result<()> {
        let _guard = self.lock();
        if !self.store.remove(id)? {
            return Err(ListError::NotFound(id.to_string()));
        }
        info!(id = %id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;
    use tempfile::tempdir;
    use todo_persistence::{JsonItemStore, MemoryItemStore, PersistenceError};

    fn make_list() -> TodoList {
        TodoList::new(Arc::new(MemoryItemStore::new()))
    }

    fn orders(list: &TodoList) -> Vec<i64> {
        list.list().unwrap().iter().map(|i| i.order).collect()
    }

    fn assert_distinct(list: &TodoList) {
        let all = orders(list);
        let unique: HashSet<i64> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len(), "duplicate orders in {:?}", all);
    }

    #[test]
    fn test_create_assigns_increasing_orders() {
        let list = make_list();
        for expected in 1..=5 {
            let item = list.create(format!("task {}", expected)).unwrap();
            assert_eq!(item.order, expected);
            assert!(item.done_at.is_none());
        }
    }

    #[test]
    fn test_create_appends_above_max_after_gaps() {
        let list = make_list();
        let a = list.create("a").unwrap();
        list.create("b").unwrap();
        list.update(&a.id, ItemPatch::new().with_order(40)).unwrap();

        let c = list.create("c").unwrap();
        assert_eq!(c.order, 41);
    }

    #[test]
    fn test_create_with_top_at_i64_max_is_rejected() {
        let list = make_list();
        let a = list.create("a").unwrap();
        list.update(&a.id, ItemPatch::new().with_order(i64::MAX))
            .unwrap();

        assert!(matches!(
            list.create("b"),
            Err(ListError::Validation(ValidationError::NoOrderAbove(i64::MAX)))
        ));
        assert_eq!(orders(&list), vec![i64::MAX]);

        // Moving the top item down frees room again
        list.update(&a.id, ItemPatch::new().with_order(1)).unwrap();
        let b = list.create("b").unwrap();
        assert_eq!(b.order, 2);
        assert_distinct(&list);
    }

    #[test]
    fn test_writes_continue_after_panic_inside_guard() {
        let list = make_list();
        let a = list.create("a").unwrap();

        let poisoner = list.clone();
        let joined = thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("writer died holding the guard");
        })
        .join();
        assert!(joined.is_err());
        assert!(list.write_guard.is_poisoned());

        let b = list.create("b").unwrap();
        assert_eq!(b.order, 2);
        list.update(&a.id, ItemPatch::new().with_order(2)).unwrap();
        list.delete(&b.id).unwrap();
        assert_eq!(orders(&list), vec![2]);
    }

    #[test]
    fn test_create_rejects_invalid_value() {
        let list = make_list();
        assert!(matches!(
            list.create(""),
            Err(ListError::Validation(ValidationError::TooShort { .. }))
        ));
        assert!(matches!(
            list.create("x".repeat(51)),
            Err(ListError::Validation(ValidationError::TooLong { .. }))
        ));
        assert!(list.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_scenario_buy_milk_walk_dog() {
        let list = make_list();
        assert!(list.list().unwrap().is_empty());

        list.create("buy milk").unwrap();
        list.create("walk dog").unwrap();

        let items = list.list().unwrap();
        let view: Vec<(&str, i64)> = items.iter().map(|i| (i.value.as_str(), i.order)).collect();
        assert_eq!(view, vec![("walk dog", 2), ("buy milk", 1)]);
    }

    #[test]
    fn test_update_swaps_with_holder() {
        let list = make_list();
        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();

        list.update(&a.id, ItemPatch::new().with_order(2)).unwrap();

        let items = list.list().unwrap();
        assert_eq!(items[0].id, a.id);
        assert_eq!(items[0].order, 2);
        assert_eq!(items[1].id, b.id);
        assert_eq!(items[1].order, 1);
    }

    #[test]
    fn test_update_swap_leaves_others_untouched() {
        let list = make_list();
        let ids: Vec<ItemId> = (0..5)
            .map(|n| list.create(format!("t{}", n)).unwrap().id)
            .collect();

        // ids[0] has order 1, ids[3] has order 4
        list.update(&ids[0], ItemPatch::new().with_order(4)).unwrap();

        let store = list.store();
        let order_of = |id: &ItemId| store.get(id).unwrap().unwrap().order;
        assert_eq!(order_of(&ids[0]), 4);
        assert_eq!(order_of(&ids[3]), 1);
        assert_eq!(order_of(&ids[1]), 2);
        assert_eq!(order_of(&ids[2]), 3);
        assert_eq!(order_of(&ids[4]), 5);
    }

    #[test]
    fn test_update_to_free_order_moves_only_target() {
        let list = make_list();
        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();

        list.update(&a.id, ItemPatch::new().with_order(10)).unwrap();

        assert_eq!(orders(&list), vec![10, 2]);
        assert_eq!(list.list().unwrap()[1].id, b.id);
    }

    #[test]
    fn test_update_to_own_order_is_noop() {
        let list = make_list();
        let a = list.create("A").unwrap();
        list.create("B").unwrap();

        list.update(&a.id, ItemPatch::new().with_order(1)).unwrap();
        assert_eq!(orders(&list), vec![2, 1]);
    }

    #[test]
    fn test_update_done_toggles() {
        let list = make_list();
        let a = list.create("A").unwrap();
        let get = |id: &ItemId| list.store().get(id).unwrap().unwrap();

        list.update(&a.id, ItemPatch::new().with_done(true)).unwrap();
        let done_at = get(&a.id).done_at;
        assert!(done_at.is_some());

        // Omitting done leaves it alone
        list.update(&a.id, ItemPatch::new().with_value("A2")).unwrap();
        assert_eq!(get(&a.id).done_at, done_at);

        list.update(&a.id, ItemPatch::new().with_done(false)).unwrap();
        assert!(get(&a.id).done_at.is_none());
    }

    #[test]
    fn test_update_value() {
        let list = make_list();
        let a = list.create("old").unwrap();
        let get = |id: &ItemId| list.store().get(id).unwrap().unwrap();

        list.update(&a.id, ItemPatch::new().with_value("new")).unwrap();
        assert_eq!(get(&a.id).value.as_str(), "new");

        // Empty value is ignored
        list.update(&a.id, ItemPatch::new().with_value("")).unwrap();
        assert_eq!(get(&a.id).value.as_str(), "new");

        assert!(matches!(
            list.update(&a.id, ItemPatch::new().with_value("y".repeat(51))),
            Err(ListError::Validation(_))
        ));
        assert_eq!(get(&a.id).value.as_str(), "new");
    }

    #[test]
    fn test_update_all_fields_at_once() {
        let list = make_list();
        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();

        let patch = ItemPatch::new()
            .with_order(2)
            .with_done(true)
            .with_value("A!");
        list.update(&a.id, patch).unwrap();

        let items = list.list().unwrap();
        assert_eq!(items[0].id, a.id);
        assert_eq!(items[0].value.as_str(), "A!");
        assert!(items[0].is_done());
        assert_eq!(items[1].id, b.id);
        assert!(!items[1].is_done());
    }

    #[test]
    fn test_empty_patch_succeeds() {
        let list = make_list();
        let a = list.create("A").unwrap();
        list.update(&a.id, ItemPatch::new()).unwrap();
        assert_eq!(list.store().get(&a.id).unwrap().unwrap(), a);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let list = make_list();
        let result = list.update(&ItemId::new(), ItemPatch::new().with_value("x"));
        assert!(matches!(result, Err(ListError::NotFound(_))));
    }

    #[test]
    fn test_delete_keeps_gaps() {
        let list = make_list();
        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();
        let c = list.create("C").unwrap();

        list.delete(&b.id).unwrap();

        let items = list.list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].id.clone(), items[0].order), (c.id, 3));
        assert_eq!((items[1].id.clone(), items[1].order), (a.id, 1));

        assert!(matches!(list.delete(&b.id), Err(ListError::NotFound(_))));
    }

    #[test]
    fn test_mixed_sequence_keeps_orders_distinct_and_sorted() {
        let list = make_list();
        // Small LCG so the sequence is varied but reproducible
        let mut seed: u64 = 0x2545_f491;
        let mut next = move |bound: u64| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 33) % bound
        };

        for step in 0..200 {
            let items = list.list().unwrap();
            match next(4) {
                0 | 1 => {
                    list.create(format!("step {}", step)).unwrap();
                }
                2 if !items.is_empty() => {
                    let target = &items[next(items.len() as u64) as usize];
                    let order = next(items.len() as u64 + 3) as i64 + 1;
                    list.update(&target.id, ItemPatch::new().with_order(order))
                        .unwrap();
                }
                3 if !items.is_empty() => {
                    let target = &items[next(items.len() as u64) as usize];
                    list.delete(&target.id).unwrap();
                }
                _ => {}
            }

            assert_distinct(&list);
            let all = orders(&list);
            assert!(all.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_concurrent_creates_get_distinct_orders() {
        let list = make_list();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let list = list.clone();
                thread::spawn(move || {
                    for n in 0..10 {
                        list.create(format!("t{}-{}", t, n)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut all = orders(&list);
        all.sort_unstable();
        assert_eq!(all, (1..=80).collect::<Vec<i64>>());
    }

    #[test]
    fn test_concurrent_swaps_keep_orders_distinct() {
        let list = make_list();
        let ids: Vec<ItemId> = (0..6)
            .map(|n| list.create(format!("t{}", n)).unwrap().id)
            .collect();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let list = list.clone();
                let ids = ids.clone();
                thread::spawn(move || {
                    for n in 0..25 {
                        let id = &ids[(t + n) % ids.len()];
                        let order = ((t * 7 + n * 3) % ids.len()) as i64 + 1;
                        list.update(id, ItemPatch::new().with_order(order)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut all = orders(&list);
        all.sort_unstable();
        assert_eq!(all, (1..=6).collect::<Vec<i64>>());
    }

    #[test]
    fn test_with_json_store() {
        let dir = tempdir().unwrap();
        let list = TodoList::new(Arc::new(JsonItemStore::new(dir.path())));

        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();
        list.update(&a.id, ItemPatch::new().with_order(2).with_done(true))
            .unwrap();

        let reopened = TodoList::new(Arc::new(JsonItemStore::new(dir.path())));
        let items = reopened.list().unwrap();
        assert_eq!(items[0].id, a.id);
        assert!(items[0].is_done());
        assert_eq!(items[1].id, b.id);
        assert_eq!(items[1].order, 1);
    }

    #[test]
    fn test_corrupt_document_blocks_create_and_swap() {
        let dir = tempdir().unwrap();
        let store = JsonItemStore::open(dir.path()).unwrap();
        let list = TodoList::new(Arc::new(store.clone()));

        let a = list.create("A").unwrap();
        // Truncated write of an item that held order 5
        std::fs::write(
            store.todos_dir().join("item-lost.json"),
            r#"{"id":"item-lost","value":"B","order":5"#,
        )
        .unwrap();

        assert!(matches!(
            list.create("C"),
            Err(ListError::Store(PersistenceError::CorruptDocument { .. }))
        ));
        assert!(matches!(
            list.update(&a.id, ItemPatch::new().with_order(5)),
            Err(ListError::Store(PersistenceError::CorruptDocument { .. }))
        ));

        let items = list.list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order, 1);
    }

    /// Store that refuses to save one particular item.
    struct FailingSaveStore {
        inner: MemoryItemStore,
        fail_on: Mutex<Option<ItemId>>,
    }

    impl ItemStore for FailingSaveStore {
        fn insert(&self, new: NewItem) -> todo_persistence::Result<Item> {
            self.inner.insert(new)
        }

        fn get(&self, id: &ItemId) -> todo_persistence::Result<Option<Item>> {
            self.inner.get(id)
        }

        fn save(&self, item: &Item) -> todo_persistence::Result<()> {
            if self.fail_on.lock().unwrap().as_ref() == Some(&item.id) {
                return Err(PersistenceError::WriteError {
                    path: "todos".into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                });
            }
            self.inner.save(item)
        }

        fn remove(&self, id: &ItemId) -> todo_persistence::Result<bool> {
            self.inner.remove(id)
        }

        fn list_all_descending_by_order(&self) -> todo_persistence::Result<Vec<Item>> {
            self.inner.list_all_descending_by_order()
        }
    }

    #[test]
    fn test_failed_target_write_leaves_partner_applied() {
        let store = Arc::new(FailingSaveStore {
            inner: MemoryItemStore::new(),
            fail_on: Mutex::new(None),
        });
        let list = TodoList::new(store.clone());
        let a = list.create("A").unwrap();
        let b = list.create("B").unwrap();

        *store.fail_on.lock().unwrap() = Some(a.id.clone());
        let result = list.update(&a.id, ItemPatch::new().with_order(2));
        assert!(matches!(result, Err(ListError::Store(_))));

        // B took A's old order, A kept its own
        assert_eq!(store.get(&b.id).unwrap().unwrap().order, 1);
        assert_eq!(store.get(&a.id).unwrap().unwrap().order, 1);
    }
}
