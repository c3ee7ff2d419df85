//! Combat events published on the event bus

use crypt_core::EntityId;

/// An entity with health died. Published exactly once per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityKilled {
    /// The entity that died
    pub entity: EntityId,
    /// Who dealt the killing blow
    pub killer: Option<EntityId>,
}

/// An entity took non-lethal damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDamaged {
    /// The damaged entity
    pub entity: EntityId,
    /// Damage amount
    pub amount: u32,
    /// Health left
    pub remaining: u32,
    /// Maximum health
    pub max: u32,
}
