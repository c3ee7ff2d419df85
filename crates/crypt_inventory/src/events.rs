//! Inventory events

use crate::item::CollectibleKind;
use crypt_core::{EntityId, ItemId};

/// A collectible finished its pickup and left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    /// The collectible
    pub item: ItemId,
    /// What it was
    pub kind: CollectibleKind,
    /// Who picked it up
    pub picker: EntityId,
}
