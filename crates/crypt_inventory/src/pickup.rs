//! Two-phase pickup
//!
//! Touching a collectible claims it at once, so it cannot be picked up twice.
//! Collection follows after the pickup delay as a deferred action; only then
//! does the collectible leave the world and announce [`ItemPickedUp`].

use crate::events::ItemPickedUp;
use crate::inventory::Inventory;
use crate::item::{Collectible, CollectibleKind, PickupState};
use crypt_core::{EntityId, ItemId, Scheduler};
use crypt_event::EventBus;

/// Deferred pickup action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupCue {
    /// Finish collecting an item claimed by a picker
    Complete { item: ItemId, picker: EntityId },
}

/// Result of a pickup attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    /// The item was claimed; collection is pending
    Claimed(CollectibleKind),
    /// Hidden, already claimed or collected
    Unavailable,
}

impl Collectible {
    /// Claim the collectible for `picker`. Keys go into the inventory right
    /// away; collection is scheduled after the pickup delay.
    pub fn claim(
        &mut self,
        picker: EntityId,
        inventory: &mut Inventory,
        scheduler: &mut Scheduler<PickupCue>,
    ) -> PickupOutcome {
        if self.state != PickupState::Active {
            log::trace!("{} not available for pickup ({:?})", self.id, self.state);
            return PickupOutcome::Unavailable;
        }

        self.state = PickupState::Claimed;
        if self.kind == CollectibleKind::Key {
            inventory.add(self.id);
        }
        scheduler.schedule(
            self.pickup_delay,
            self.lifeline.guard(),
            PickupCue::Complete {
                item: self.id,
                picker,
            },
        );

        log::debug!("{} claimed by {}", self.id, picker);
        PickupOutcome::Claimed(self.kind)
    }

    /// Finish a claimed pickup: the collectible becomes inactive and
    /// [`ItemPickedUp`] is published. Returns false unless it was claimed.
    pub fn complete(&mut self, picker: EntityId, bus: &EventBus) -> bool {
        if self.state != PickupState::Claimed {
            return false;
        }

        self.state = PickupState::Collected;
        log::info!("{:?} {} collected", self.kind, self.id);
        bus.publish(ItemPickedUp {
            item: self.id,
            kind: self.kind,
            picker,
        });
        true
    }

    /// Cancel any pending collection (the level is being torn down)
    pub fn teardown(&mut self) {
        self.lifeline.sever();
    }
}
