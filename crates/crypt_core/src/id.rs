//! Stable opaque identifiers
//!
//! Actors, collectibles and collision bodies are referred to by index-only
//! ids handed out at creation. Nothing is ever reused within a level, so no
//! generation is carried.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Declares a strongly typed index so entity, item and body identifiers
/// cannot be mixed up at call sites.
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Build from a raw index
            #[inline]
            pub const fn from_index(index: u32) -> Self {
                Self(index)
            }

            /// Get the raw index
            #[inline]
            pub const fn index(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

typed_id!(
    /// Identity of an actor with health: the player or a hostile entity
    EntityId,
    "Entity"
);

typed_id!(
    /// Identity of a collectible (treasure, key)
    ItemId,
    "Item"
);

typed_id!(
    /// Identity of a collision body in the world
    BodyId,
    "Body"
);

/// Thread-safe generator for entity and item ids.
///
/// Entities and items draw from one sequence, so an entity and an item never
/// share an index within a level. Bodies are numbered by the world that owns
/// them.
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    /// Create a new ID generator
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(0),
        }
    }

    fn next_index(&self) -> u32 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Generate the next entity ID
    pub fn next_entity(&self) -> EntityId {
        EntityId(self.next_index())
    }

    /// Generate the next item ID
    pub fn next_item(&self) -> ItemId {
        ItemId(self.next_index())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_ids_share_one_sequence() {
        let gen = IdGenerator::new();
        let player = gen.next_entity();
        let key = gen.next_item();
        let ghoul = gen.next_entity();

        assert_eq!(player.index(), 0);
        assert_eq!(key.index(), 1);
        assert_eq!(ghoul, EntityId::from_index(2));
        assert_ne!(player, ghoul);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(EntityId::from_index(3).to_string(), "Entity#3");
        assert_eq!(format!("{:?}", ItemId::from_index(1)), "Item(1)");
        assert_eq!(format!("{:?}", BodyId::from_index(0)), "Body(0)");
    }
}
