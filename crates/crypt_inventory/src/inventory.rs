//! Inventory component

use crypt_core::ItemId;
use std::collections::HashSet;

/// Set of item identities carried by an actor
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: HashSet<ItemId>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns false if it was already held.
    pub fn add(&mut self, item: ItemId) -> bool {
        let added = self.items.insert(item);
        if added {
            log::debug!("Inventory: added {}", item);
        }
        added
    }

    /// Remove an item
    pub fn remove(&mut self, item: ItemId) -> bool {
        self.items.remove(&item)
    }

    /// Check for an item
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items (no particular order)
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter()
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
