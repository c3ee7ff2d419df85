//! Collectible definitions

use crypt_core::math::{self, Vec3};
use crypt_core::{ItemId, Lifeline};
use serde::{Deserialize, Serialize};

/// What a collectible is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Counts toward a collect-all objective
    Treasure,
    /// Goes into the inventory and unlocks a door
    Key,
}

/// Lifecycle of a collectible. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupState {
    /// Not yet in the world (inside a closed chest)
    Hidden,
    /// Can be picked up
    Active,
    /// Picked up, waiting for the pickup delay to elapse
    Claimed,
    /// Gone from the world
    Collected,
}

/// A collectible placed in a level
#[derive(Debug, Clone)]
pub struct Collectible {
    /// Identity
    pub id: ItemId,
    /// Treasure or key
    pub kind: CollectibleKind,
    /// World position
    pub position: Vec3,
    /// Pickup radius
    pub radius: f32,
    /// Seconds between claim and collection
    pub pickup_delay: f32,
    pub(crate) state: PickupState,
    pub(crate) lifeline: Lifeline,
}

impl Collectible {
    /// Create an active collectible
    pub fn new(id: ItemId, kind: CollectibleKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            radius: 1.0,
            pickup_delay: 3.0,
            state: PickupState::Active,
            lifeline: Lifeline::new(),
        }
    }

    /// Create a treasure
    pub fn treasure(id: ItemId, position: Vec3) -> Self {
        Self::new(id, CollectibleKind::Treasure, position)
    }

    /// Create a key
    pub fn key(id: ItemId, position: Vec3) -> Self {
        Self::new(id, CollectibleKind::Key, position)
    }

    /// Set pickup radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set pickup delay
    pub fn with_pickup_delay(mut self, delay: f32) -> Self {
        self.pickup_delay = delay;
        self
    }

    /// Start hidden until revealed (e.g. by opening a chest)
    pub fn hidden(mut self) -> Self {
        self.state = PickupState::Hidden;
        self
    }

    /// Current state
    pub fn state(&self) -> PickupState {
        self.state
    }

    /// True until the collectible has been collected
    pub fn is_active(&self) -> bool {
        self.state != PickupState::Collected
    }

    /// Check if the collectible can currently be picked up
    pub fn is_available(&self) -> bool {
        self.state == PickupState::Active
    }

    /// Check if a picker at `position` is close enough
    pub fn in_range(&self, position: Vec3) -> bool {
        self.is_available() && math::distance(self.position, position) <= self.radius
    }

    /// Make a hidden collectible available. Returns false if it was not hidden.
    pub fn reveal(&mut self) -> bool {
        if self.state != PickupState::Hidden {
            return false;
        }
        self.state = PickupState::Active;
        log::debug!("{} revealed", self.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collectible_creation() {
        let treasure = Collectible::treasure(ItemId::from_index(1), [0.0; 3])
            .with_radius(2.0)
            .with_pickup_delay(1.5);

        assert_eq!(treasure.kind, CollectibleKind::Treasure);
        assert_eq!(treasure.radius, 2.0);
        assert_eq!(treasure.pickup_delay, 1.5);
        assert!(treasure.is_available());
        assert!(treasure.in_range([1.0, 0.0, 1.0]));
        assert!(!treasure.in_range([3.0, 0.0, 0.0]));
    }

    #[test]
    fn test_hidden_until_revealed() {
        let mut treasure = Collectible::treasure(ItemId::from_index(1), [0.0; 3]).hidden();

        assert!(treasure.is_active());
        assert!(!treasure.in_range([0.0; 3]));

        assert!(treasure.reveal());
        assert!(!treasure.reveal());
        assert!(treasure.in_range([0.0; 3]));
    }
}
