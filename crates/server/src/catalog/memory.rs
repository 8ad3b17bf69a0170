//! In-process catalog backend.
//!
//! A mutex-guarded ordered map keyed by id. The guard makes each operation
//! atomic, so concurrent requests observe a consistent view; ids ascend in
//! insertion order, which keeps `list` output stable.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use budget_lunch_core::ItemId;

use crate::models::{Item, NewItem};

/// The menu the original local database shipped with.
const DEFAULT_MENU: [(&str, f64, &str); 4] = [
    (
        "pizza",
        6.99,
        "https://ooni.com/cdn/shop/articles/20220211142347-margherita-9920.jpg",
    ),
    (
        "salad",
        5.99,
        "https://cdn.loveandlemons.com/wp-content/uploads/2021/04/green-salad.jpg",
    ),
    (
        "soda",
        1.99,
        "https://i5.walmartimages.com/asr/bba96e0f-0444-4b2b-8e55-d90edf928e00.jpeg",
    ),
    (
        "coffee",
        2.99,
        "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQO9TfIFqT5Np6d9CSiJB0QdXnOGE2NPaOXGQ&s",
    ),
];

#[derive(Debug)]
struct MemoryInner {
    next_id: i64,
    items: BTreeMap<ItemId, Item>,
}

/// In-memory catalog store.
///
/// Cheap to clone; clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    inner: Arc<Mutex<MemoryInner>>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                next_id: 1,
                items: BTreeMap::new(),
            })),
        }
    }

    /// Create a catalog seeded with the default lunch menu.
    #[must_use]
    pub fn with_default_menu() -> Self {
        let store = Self::new();
        for (name, price, imageurl) in DEFAULT_MENU {
            store.add(NewItem {
                name: name.to_string(),
                price,
                imageurl: Some(imageurl.to_string()),
            });
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means another request panicked mid-operation;
        // the map itself is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every item, in id order.
    #[must_use]
    pub fn list(&self) -> Vec<Item> {
        self.lock().items.values().cloned().collect()
    }

    /// Items with `price <= max_price`, in id order.
    #[must_use]
    pub fn search(&self, max_price: f64) -> Vec<Item> {
        self.lock()
            .items
            .values()
            .filter(|item| item.price <= max_price)
            .cloned()
            .collect()
    }

    /// Append a new item under the next id.
    pub fn add(&self, item: NewItem) -> Item {
        let mut inner = self.lock();
        let id = ItemId::new(inner.next_id);
        inner.next_id += 1;

        let item = Item {
            id,
            name: item.name,
            price: item.price,
            imageurl: item.imageurl,
        };
        inner.items.insert(id, item.clone());
        item
    }

    /// Replace all fields of the item matching `id`.
    ///
    /// Returns `false` when the id matched nothing.
    pub fn update(&self, id: ItemId, item: NewItem) -> bool {
        match self.lock().items.get_mut(&id) {
            Some(existing) => {
                existing.name = item.name;
                existing.price = item.price;
                existing.imageurl = item.imageurl;
                true
            }
            None => false,
        }
    }

    /// Remove the item matching `id`.
    ///
    /// Returns `false` when the id matched nothing.
    pub fn delete(&self, id: ItemId) -> bool {
        self.lock().items.remove(&id).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_default_menu_search_thresholds() {
        let store = MemoryCatalog::with_default_menu();

        assert_eq!(store.search(10.00).len(), 4);
        assert_eq!(names(&store.search(2.99)), ["soda", "coffee"]);
        assert!(store.search(0.50).is_empty());
        assert_eq!(names(&store.search(1.99)), ["soda"]);
    }

    #[test]
    fn test_search_is_exactly_the_at_most_subset() {
        let store = MemoryCatalog::with_default_menu();
        let all = store.list();
        let found = store.search(5.99);

        for item in &all {
            assert_eq!(
                found.iter().any(|f| f.id == item.id),
                item.price <= 5.99,
                "wrong membership for {}",
                item.name
            );
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let store = MemoryCatalog::with_default_menu();
        assert_eq!(store.search(2.99), store.search(2.99));
    }

    #[test]
    fn test_search_is_monotonic() {
        let store = MemoryCatalog::with_default_menu();
        let narrow = store.search(2.99);
        let wide = store.search(6.99);

        for item in &narrow {
            assert!(wide.iter().any(|w| w.id == item.id));
        }
    }

    #[test]
    fn test_add_assigns_ascending_ids_and_is_searchable() {
        let store = MemoryCatalog::new();
        let first = store.add(NewItem {
            name: "bagel".to_string(),
            price: 3.49,
            imageurl: None,
        });
        let second = store.add(NewItem {
            name: "burrito".to_string(),
            price: 8.99,
            imageurl: None,
        });

        assert!(first.id < second.id);
        assert_eq!(names(&store.search(3.49)), ["bagel"]);
    }

    #[test]
    fn test_negative_prices_and_thresholds_are_permitted() {
        let store = MemoryCatalog::new();
        store.add(NewItem {
            name: "promo".to_string(),
            price: -1.00,
            imageurl: None,
        });

        assert_eq!(store.search(0.0).len(), 1);
        assert_eq!(store.search(-1.0).len(), 1);
        assert!(store.search(-2.0).is_empty());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let store = MemoryCatalog::with_default_menu();
        let pizza_id = store.list()[0].id;

        let found = store.update(
            pizza_id,
            NewItem {
                name: "deep dish".to_string(),
                price: 9.99,
                imageurl: None,
            },
        );
        assert!(found);

        let updated = &store.list()[0];
        assert_eq!(updated.id, pizza_id);
        assert_eq!(updated.name, "deep dish");
        assert!((updated.price - 9.99).abs() < f64::EPSILON);
        assert_eq!(updated.imageurl, None);
    }

    #[test]
    fn test_update_missing_id_is_a_reported_noop() {
        let store = MemoryCatalog::with_default_menu();
        let before = store.list();

        let found = store.update(
            ItemId::new(999),
            NewItem {
                name: "ghost".to_string(),
                price: 0.0,
                imageurl: None,
            },
        );

        assert!(!found);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_delete_removes_only_the_matching_id() {
        let store = MemoryCatalog::with_default_menu();
        let soda_id = store
            .list()
            .iter()
            .find(|i| i.name == "soda")
            .unwrap()
            .id;

        assert!(store.delete(soda_id));
        assert!(!store.delete(soda_id));
        assert_eq!(store.list().len(), 3);
        assert!(store.list().iter().all(|i| i.name != "soda"));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = MemoryCatalog::new();
        let first = store.add(NewItem {
            name: "a".to_string(),
            price: 1.0,
            imageurl: None,
        });
        store.delete(first.id);

        let second = store.add(NewItem {
            name: "b".to_string(),
            price: 2.0,
            imageurl: None,
        });
        assert!(second.id > first.id);
    }
}
