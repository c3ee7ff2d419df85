//! Deferred combat actions

use crypt_core::EntityId;

/// Combat side effects that end after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatCue {
    /// Damage flash on an enemy is over
    EndFlash(EntityId),
    /// Player invulnerability window is over
    EndInvulnerability(EntityId),
}
