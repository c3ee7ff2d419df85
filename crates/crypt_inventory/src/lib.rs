//! # crypt_inventory - Collectibles and Inventory
//!
//! # Features
//!
//! - Treasure and key collectibles with a two-phase, delayed pickup
//! - `ItemPickedUp` event published when a pickup completes
//! - Player inventory (set of item ids)
//! - Doors (optionally key-locked), one-shot switches and treasure chests
//!
//! # Example
//!
//! ```ignore
//! use crypt_inventory::prelude::*;
//!
//! let mut key = Collectible::key(key_id, [4.0, 0.0, 2.0]);
//! if key.in_range(player_pos) {
//!     key.claim(player_id, &mut inventory, &mut pickups);
//! }
//!
//! let mut door = Door::new().with_key(key_id);
//! assert!(matches!(door.interact(&inventory), Interaction::Opened(_)));
//! ```

pub mod events;
pub mod interact;
pub mod inventory;
pub mod item;
pub mod pickup;

pub mod prelude {
    pub use crate::events::ItemPickedUp;
    pub use crate::interact::{Chest, Door, DoorState, Interactable, Interaction, Switch};
    pub use crate::inventory::Inventory;
    pub use crate::item::{Collectible, CollectibleKind, PickupState};
    pub use crate::pickup::{PickupCue, PickupOutcome};
}

pub use prelude::*;
