//! Interactable world objects: doors, switches, chests

use crate::inventory::Inventory;
use crypt_core::{BodyId, ItemId};

/// What an interaction did; the caller applies the world-side effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// A door opened; its blocking body should be disabled
    Opened(Option<BodyId>),
    /// A door closed; its blocking body should be enabled
    Closed(Option<BodyId>),
    /// A switch fired; its linked body (gate, bridge) changes state
    Activated(Option<BodyId>),
    /// A chest opened and revealed its contents
    Revealed(ItemId),
    /// The interactor lacks the required key
    Locked,
    /// Nothing happened (already used)
    Ignored,
}

/// Something the player can use
pub trait Interactable {
    /// Use the object with the interactor's inventory
    fn interact(&mut self, inventory: &Inventory) -> Interaction;
}

/// Door state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
}

/// A door, optionally locked behind a key
#[derive(Debug, Clone, Default)]
pub struct Door {
    /// Key needed to operate the door
    pub key: Option<ItemId>,
    /// Body blocking the doorway while closed
    pub body: Option<BodyId>,
    state: DoorState,
}

impl Door {
    /// Create a closed, unlocked door
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a key
    pub fn with_key(mut self, key: ItemId) -> Self {
        self.key = Some(key);
        self
    }

    /// Attach the blocking body
    pub fn with_body(mut self, body: BodyId) -> Self {
        self.body = Some(body);
        self
    }

    /// Current state
    pub fn state(&self) -> DoorState {
        self.state
    }

    /// Check if open
    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }
}

impl Interactable for Door {
    fn interact(&mut self, inventory: &Inventory) -> Interaction {
        if let Some(key) = self.key {
            if !inventory.contains(key) {
                log::debug!("Door locked, missing {}", key);
                return Interaction::Locked;
            }
        }

        match self.state {
            DoorState::Closed => {
                self.state = DoorState::Open;
                Interaction::Opened(self.body)
            }
            DoorState::Open => {
                self.state = DoorState::Closed;
                Interaction::Closed(self.body)
            }
        }
    }
}

/// One-shot switch
#[derive(Debug, Clone, Default)]
pub struct Switch {
    /// Body driven by the switch
    pub linked: Option<BodyId>,
    activated: bool,
}

impl Switch {
    /// Create a switch driving `linked`
    pub fn new(linked: Option<BodyId>) -> Self {
        Self {
            linked,
            activated: false,
        }
    }

    /// Check if already used
    pub fn is_activated(&self) -> bool {
        self.activated
    }
}

impl Interactable for Switch {
    fn interact(&mut self, _inventory: &Inventory) -> Interaction {
        if self.activated {
            return Interaction::Ignored;
        }
        self.activated = true;
        log::debug!("Switch activated");
        Interaction::Activated(self.linked)
    }
}

/// A chest holding a hidden collectible
#[derive(Debug, Clone)]
pub struct Chest {
    /// Collectible revealed on opening
    pub contents: ItemId,
    opened: bool,
}

impl Chest {
    /// Create a closed chest
    pub fn new(contents: ItemId) -> Self {
        Self {
            contents,
            opened: false,
        }
    }

    /// Check if opened
    pub fn is_opened(&self) -> bool {
        self.opened
    }
}

impl Interactable for Chest {
    fn interact(&mut self, _inventory: &Inventory) -> Interaction {
        if self.opened {
            return Interaction::Ignored;
        }
        self.opened = true;
        Interaction::Revealed(self.contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_door_toggles() {
        let body = BodyId::from_index(9);
        let mut door = Door::new().with_body(body);
        let inventory = Inventory::new();

        assert_eq!(door.interact(&inventory), Interaction::Opened(Some(body)));
        assert!(door.is_open());
        assert_eq!(door.interact(&inventory), Interaction::Closed(Some(body)));
        assert_eq!(door.state(), DoorState::Closed);
    }

    #[test]
    fn test_locked_door_needs_key() {
        let key = ItemId::from_index(4);
        let mut door = Door::new().with_key(key);
        let mut inventory = Inventory::new();

        assert_eq!(door.interact(&inventory), Interaction::Locked);
        assert!(!door.is_open());

        inventory.add(key);
        assert_eq!(door.interact(&inventory), Interaction::Opened(None));
    }

    #[test]
    fn test_switch_fires_once() {
        let gate = BodyId::from_index(2);
        let mut switch = Switch::new(Some(gate));
        let inventory = Inventory::new();

        assert_eq!(switch.interact(&inventory), Interaction::Activated(Some(gate)));
        assert_eq!(switch.interact(&inventory), Interaction::Ignored);
        assert!(switch.is_activated());
    }

    #[test]
    fn test_chest_reveals_once() {
        let gold = ItemId::from_index(7);
        let mut chest = Chest::new(gold);
        let inventory = Inventory::new();

        assert_eq!(chest.interact(&inventory), Interaction::Revealed(gold));
        assert_eq!(chest.interact(&inventory), Interaction::Ignored);
    }
}
