//! Trigger zones around enemies
//!
//! Each enemy carries two spheres centred on itself: the alert zone and the
//! attack zone. The player's overlap with each is compared to the previous
//! frame and the changes become [`CombatCommand`]s.

use crypt_combat::CombatCommand;
use crypt_core::math::{self, Vec3};
use crypt_core::EntityId;

/// Overlap state of one enemy's zones
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyZones {
    in_alert: bool,
    in_attack: bool,
}

impl EnemyZones {
    /// Create with nothing inside
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_in_alert(&self) -> bool {
        self.in_alert
    }

    pub fn player_in_attack(&self) -> bool {
        self.in_attack
    }

    /// Compare the player's position against the zones and return the
    /// commands for every boundary crossed since the last update. A dead or
    /// missing player counts as outside.
    pub fn update(
        &mut self,
        center: Vec3,
        alert_radius: f32,
        attack_radius: f32,
        player: Option<(EntityId, Vec3)>,
    ) -> Vec<CombatCommand> {
        let mut commands = Vec::new();

        let (in_alert, in_attack) = match player {
            Some((_, position)) => {
                let distance = math::distance(center, position);
                (distance <= alert_radius, distance <= attack_radius)
            }
            None => (false, false),
        };

        match (self.in_alert, in_alert, player) {
            (false, true, Some((id, _))) => commands.push(CombatCommand::AlertEnter(id)),
            (true, false, _) => commands.push(CombatCommand::AlertExit),
            _ => {}
        }

        // Leaving the attack zone has no command of its own
        if let (false, true, Some((id, _))) = (self.in_attack, in_attack, player) {
            commands.push(CombatCommand::AttackEnter(id));
        }

        self.in_alert = in_alert;
        self.in_attack = in_attack;
        commands
    }

    /// Forget overlaps (enemy removed from play)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: EntityId = EntityId::from_index(0);

    fn at(z: f32) -> Option<(EntityId, Vec3)> {
        Some((PLAYER, [0.0, 0.0, z]))
    }

    #[test]
    fn test_edges_only() {
        let mut zones = EnemyZones::new();
        let center = [0.0; 3];

        assert!(zones.update(center, 10.0, 3.0, at(20.0)).is_empty());
        assert_eq!(
            zones.update(center, 10.0, 3.0, at(8.0)),
            vec![CombatCommand::AlertEnter(PLAYER)]
        );
        assert!(zones.update(center, 10.0, 3.0, at(7.0)).is_empty());
        assert_eq!(
            zones.update(center, 10.0, 3.0, at(2.0)),
            vec![CombatCommand::AttackEnter(PLAYER)]
        );
        assert!(zones.update(center, 10.0, 3.0, at(5.0)).is_empty());
        assert!(!zones.player_in_attack());
        assert_eq!(
            zones.update(center, 10.0, 3.0, at(11.0)),
            vec![CombatCommand::AlertExit]
        );
    }

    #[test]
    fn test_jump_into_both_zones() {
        let mut zones = EnemyZones::new();
        assert_eq!(
            zones.update([0.0; 3], 10.0, 3.0, at(1.0)),
            vec![
                CombatCommand::AlertEnter(PLAYER),
                CombatCommand::AttackEnter(PLAYER)
            ]
        );
    }

    #[test]
    fn test_missing_player_leaves() {
        let mut zones = EnemyZones::new();
        zones.update([0.0; 3], 10.0, 3.0, at(1.0));
        assert_eq!(
            zones.update([0.0; 3], 10.0, 3.0, None),
            vec![CombatCommand::AlertExit]
        );
        assert!(!zones.player_in_alert());

        zones.update([0.0; 3], 10.0, 3.0, at(1.0));
        zones.reset();
        assert_eq!(zones, EnemyZones::default());
    }
}
