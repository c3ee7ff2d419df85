//! The player actor

use crate::actor::ActorView;
use crate::cue::CombatCue;
use crate::damage::DamageInfo;
use crate::events::{EntityDamaged, EntityKilled};
use crate::health::{Health, HealthChange};
use crate::weapon::{Gun, GunStats};
use crypt_core::math::Vec3;
use crypt_core::{BodyId, EntityId, Lifeline, Scheduler};
use crypt_event::EventBus;
use crypt_inventory::Inventory;
use serde::{Deserialize, Serialize};

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting and maximum health
    pub max_health: u32,
    /// Seconds of invulnerability after a non-lethal hit
    pub invulnerability: f32,
    /// Gun carried into the level
    pub gun: GunStats,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            invulnerability: 1.0,
            gun: GunStats::default(),
        }
    }
}

/// Result of damaging the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerDamage {
    /// Dead or invulnerable
    Ignored,
    /// Survived; invulnerable for a while
    Hurt { remaining: u32 },
    /// This hit was lethal
    Killed,
}

/// The player
#[derive(Debug)]
pub struct Player {
    id: EntityId,
    body: BodyId,
    /// World position
    pub position: Vec3,
    /// Facing direction
    pub forward: Vec3,
    config: PlayerConfig,
    health: Health,
    alive: bool,
    invulnerable: bool,
    invulnerability: Lifeline,
    /// Items carried
    pub inventory: Inventory,
    /// Equipped gun
    pub gun: Gun,
}

impl Player {
    /// Create a player at full health
    pub fn new(id: EntityId, body: BodyId, position: Vec3, config: PlayerConfig) -> Self {
        Self {
            id,
            body,
            position,
            forward: [0.0, 0.0, 1.0],
            health: Health::new(config.max_health),
            gun: Gun::new(config.gun.clone()),
            config,
            alive: true,
            invulnerable: false,
            invulnerability: Lifeline::new(),
            inventory: Inventory::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Lookup view used by enemies
    pub fn view(&self) -> ActorView {
        ActorView {
            id: self.id,
            position: self.position,
            body: self.body,
            alive: self.alive,
        }
    }

    /// Apply damage. Ignored while dead or invulnerable; a non-lethal hit
    /// opens an invulnerability window that closes through a deferred cue.
    pub fn apply_damage(
        &mut self,
        damage: DamageInfo,
        cues: &mut Scheduler<CombatCue>,
        bus: &EventBus,
    ) -> PlayerDamage {
        if !self.alive || self.invulnerable {
            log::trace!("Player damage ignored (alive: {}, invulnerable: {})", self.alive, self.invulnerable);
            return PlayerDamage::Ignored;
        }

        match self.health.apply(damage.amount) {
            HealthChange::Depleted => {
                self.alive = false;
                self.invulnerability.sever();
                log::info!("Player killed");
                bus.publish(EntityKilled {
                    entity: self.id,
                    killer: damage.source,
                });
                PlayerDamage::Killed
            }
            HealthChange::Reduced { remaining } => {
                self.invulnerable = true;
                self.invulnerability.renew();
                cues.schedule(
                    self.config.invulnerability,
                    self.invulnerability.guard(),
                    CombatCue::EndInvulnerability(self.id),
                );
                log::debug!("Player hit: {}/{}", remaining, self.health.max());
                bus.publish(EntityDamaged {
                    entity: self.id,
                    amount: damage.amount,
                    remaining,
                    max: self.health.max(),
                });
                PlayerDamage::Hurt { remaining }
            }
        }
    }

    /// Invulnerability window closed
    pub fn end_invulnerability(&mut self) {
        self.invulnerable = false;
    }

    /// Cancel pending deferred actions (level torn down)
    pub fn teardown(&mut self) {
        self.invulnerability.sever();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: EntityId = EntityId::from_index(0);
    const ENEMY: EntityId = EntityId::from_index(1);

    fn player(max_health: u32) -> Player {
        Player::new(
            PLAYER,
            BodyId::from_index(0),
            [0.0; 3],
            PlayerConfig {
                max_health,
                ..Default::default()
            },
        )
    }

    fn run_cues(player: &mut Player, cues: &mut Scheduler<CombatCue>, dt: f32) {
        for cue in cues.advance(dt) {
            if cue == CombatCue::EndInvulnerability(player.id()) {
                player.end_invulnerability();
            }
        }
    }

    #[test]
    fn test_invulnerability_window() {
        let mut player = player(100);
        let mut cues = Scheduler::new();
        let bus = EventBus::new();
        let hit = DamageInfo::new(10).with_source(ENEMY);

        assert_eq!(player.apply_damage(hit, &mut cues, &bus), PlayerDamage::Hurt { remaining: 90 });
        assert!(player.is_invulnerable());
        assert_eq!(player.apply_damage(hit, &mut cues, &bus), PlayerDamage::Ignored);

        run_cues(&mut player, &mut cues, 0.5);
        assert!(player.is_invulnerable());
        run_cues(&mut player, &mut cues, 0.5);
        assert!(!player.is_invulnerable());

        assert_eq!(player.apply_damage(hit, &mut cues, &bus), PlayerDamage::Hurt { remaining: 80 });
    }

    #[test]
    fn test_lethal_damage() {
        let mut player = player(5);
        let mut cues = Scheduler::new();
        let bus = EventBus::new();

        assert_eq!(
            player.apply_damage(DamageInfo::new(50), &mut cues, &bus),
            PlayerDamage::Killed
        );
        assert!(!player.is_alive());
        assert_eq!(player.health().current(), 0);
        assert!(!player.view().alive);
        assert_eq!(
            player.apply_damage(DamageInfo::new(1), &mut cues, &bus),
            PlayerDamage::Ignored
        );
    }

    #[test]
    fn test_player_carries_configured_gun() {
        let player = player(100);
        assert_eq!(player.gun.ammo_in_magazine(), 13);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_teardown_drops_pending_invulnerability_cue() {
        let mut player = player(100);
        let mut cues = Scheduler::new();
        let bus = EventBus::new();

        player.apply_damage(DamageInfo::new(10), &mut cues, &bus);
        assert_eq!(cues.pending_count(), 1);

        player.teardown();
        assert!(cues.advance(5.0).is_empty());
        assert_eq!(cues.pending_count(), 0);
    }
}
