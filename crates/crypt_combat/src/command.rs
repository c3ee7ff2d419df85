//! Trigger commands delivered to hostile entities

use crypt_core::EntityId;

/// Closed set of trigger notifications an enemy reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatCommand {
    /// An actor entered the alert zone
    AlertEnter(EntityId),
    /// An actor entered the attack zone
    AttackEnter(EntityId),
    /// The actor left the alert zone
    AlertExit,
    /// Attack animation reached its hit frame
    AttackCue,
}
