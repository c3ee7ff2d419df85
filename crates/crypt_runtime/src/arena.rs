//! The arena: one level's worth of actors, wired together
//!
//! Each [`Arena::tick`] runs, in order:
//!
//! 1. deferred actions (flash end, invulnerability end, pickup completion)
//! 2. movement and body sync
//! 3. trigger-zone commands
//! 4. enemy ticks (perception, navigation, cooldown)
//! 5. enemy attack hits on the player
//! 6. collectible proximity
//! 7. finish check (finish zone or player death)
//! 8. run timer and recoil decay

use crate::config::{GameConfig, PickupSection, Result};
use crate::mover::StraightMover;
use crate::zones::EnemyZones;
use crypt_combat::{
    hitscan, ActorLookup, ActorView, AttackHit, CombatCommand, CombatContext, CombatCue,
    CombatEntity, DamageInfo, DamageOutcome, EnemyConfig, Player, PlayerDamage, ShotOutcome,
};
use crypt_core::math::{self, Vec3};
use crypt_core::{BodyId, EntityId, IdGenerator, ItemId, Scheduler};
use crypt_event::EventBus;
use crypt_gamestate::{
    GameSession, LevelRun, LevelTimer, Objective, RecordOutcome, RunClock, RunResult,
    SceneTransition,
};
use crypt_inventory::{Chest, Collectible, Interactable, Interaction, PickupCue};
use crypt_perception::{
    Body, BodyShape, CollisionLayer, PerceptionService, RaycastOptions, StaticWorld,
};
use std::sync::Arc;

/// How far in front of the player interactables can be used
pub const INTERACT_REACH: f32 = 3.0;

/// Collision radius of the player and of enemies
pub const ACTOR_RADIUS: f32 = 0.5;

/// Result of the player pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotReport {
    /// A living enemy was hit
    Hit {
        enemy: EntityId,
        outcome: DamageOutcome,
    },
    /// Fired, but hit geometry or nothing
    Missed,
    /// Magazine empty
    DryFire,
    /// Gun not ready
    Blocked,
}

/// Shared services enemies run against
struct Systems {
    world: StaticWorld,
    perception: PerceptionService,
    bus: Arc<EventBus>,
    mover: StraightMover,
    cues: Scheduler<CombatCue>,
}

impl Systems {
    fn combat<'a>(&'a mut self, actors: &'a dyn ActorLookup) -> CombatContext<'a> {
        CombatContext {
            perception: &self.perception,
            world: &self.world,
            actors,
            bus: &self.bus,
            nav: &mut self.mover,
            cues: &mut self.cues,
        }
    }
}

/// Actors as they stood at the start of the enemy phase
struct Roster {
    player: ActorView,
}

impl ActorLookup for Roster {
    fn actor(&self, id: EntityId) -> Option<ActorView> {
        (self.player.id == id).then_some(self.player)
    }

    fn player_in_radius(&self, center: Vec3, radius: f32) -> Option<EntityId> {
        (self.player.alive && math::distance(self.player.position, center) <= radius)
            .then_some(self.player.id)
    }
}

struct EnemySlot {
    entity: CombatEntity,
    zones: EnemyZones,
}

struct Placed {
    position: Vec3,
    object: Box<dyn Interactable>,
}

struct FinishZone {
    center: Vec3,
    radius: f32,
    player_inside: bool,
}

/// A level in play
pub struct Arena {
    level_id: String,
    systems: Systems,
    ids: IdGenerator,
    player: Player,
    enemies: Vec<EnemySlot>,
    enemy_defaults: EnemyConfig,
    collectibles: Vec<Collectible>,
    pickup: PickupSection,
    pickup_cues: Scheduler<PickupCue>,
    interactables: Vec<Placed>,
    finish: Option<FinishZone>,
    queued: Vec<(EntityId, CombatCommand)>,
    run: LevelRun,
    timer: LevelTimer,
    torn_down: bool,
}

impl Arena {
    /// Create an empty level with the player at the origin
    pub fn new(level_id: impl Into<String>, config: &GameConfig, bus: Arc<EventBus>) -> Result<Self> {
        let level_id = level_id.into();
        let perception = PerceptionService::new(config.perception_config()?);

        let ids = IdGenerator::new();
        let mut world = StaticWorld::new();
        let player_body = world.add(Body::new(
            BodyShape::sphere(ACTOR_RADIUS),
            [0.0; 3],
            CollisionLayer::PLAYER,
        ));
        let player = Player::new(ids.next_entity(), player_body, [0.0; 3], config.player.clone());

        log::debug!("Arena for '{}' created", level_id);
        Ok(Self {
            run: LevelRun::new(level_id.clone(), bus.clone()),
            level_id,
            systems: Systems {
                world,
                perception,
                bus,
                mover: StraightMover::new(),
                cues: Scheduler::new(),
            },
            ids,
            player,
            enemies: Vec::new(),
            enemy_defaults: config.enemy.clone(),
            collectibles: Vec::new(),
            pickup: config.pickup.clone(),
            pickup_cues: Scheduler::new(),
            interactables: Vec::new(),
            finish: None,
            queued: Vec::new(),
            timer: LevelTimer::new(),
            torn_down: false,
        })
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.systems.bus
    }

    pub fn world(&self) -> &StaticWorld {
        &self.systems.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self, id: EntityId) -> Option<&CombatEntity> {
        self.enemies.iter().map(|s| &s.entity).find(|e| e.id() == id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &CombatEntity> {
        self.enemies.iter().map(|s| &s.entity)
    }

    pub fn collectible(&self, id: ItemId) -> Option<&Collectible> {
        self.collectibles.iter().find(|c| c.id == id)
    }

    pub fn run(&self) -> &LevelRun {
        &self.run
    }

    /// Seconds of play so far
    pub fn elapsed(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    // ---- Level building ----

    /// Add static geometry
    pub fn add_wall(&mut self, position: Vec3, half_extents: Vec3) -> BodyId {
        self.systems.world.add(Body::new(
            BodyShape::cuboid(half_extents[0], half_extents[1], half_extents[2]),
            position,
            CollisionLayer::ENVIRONMENT,
        ))
    }

    /// Spawn an enemy with the configured defaults
    pub fn spawn_enemy(&mut self, name: &str, position: Vec3) -> EntityId {
        self.spawn_enemy_with(name, position, self.enemy_defaults.clone())
    }

    /// Spawn an enemy with its own tuning
    pub fn spawn_enemy_with(&mut self, name: &str, position: Vec3, config: EnemyConfig) -> EntityId {
        let id = self.ids.next_entity();
        let body = self.systems.world.add(Body::new(
            BodyShape::sphere(ACTOR_RADIUS),
            position,
            CollisionLayer::ENEMIES,
        ));
        self.systems.mover.register(id, position, config.speed);
        self.enemies.push(EnemySlot {
            entity: CombatEntity::new(id, body, position, config).with_name(name),
            zones: EnemyZones::new(),
        });
        log::debug!("Spawned {} as {}", name, id);
        id
    }

    /// Allocate an item id for a collectible built by hand
    pub fn next_item_id(&self) -> ItemId {
        self.ids.next_item()
    }

    /// Add a collectible as given
    pub fn add_collectible(&mut self, collectible: Collectible) -> ItemId {
        let id = collectible.id;
        self.collectibles.push(collectible);
        id
    }

    /// Add a treasure using the configured pickup settings
    pub fn add_treasure(&mut self, position: Vec3) -> ItemId {
        let treasure = self.configured(Collectible::treasure(self.ids.next_item(), position));
        self.add_collectible(treasure)
    }

    /// Add a key using the configured pickup settings
    pub fn add_key(&mut self, position: Vec3) -> ItemId {
        let key = self.configured(Collectible::key(self.ids.next_item(), position));
        self.add_collectible(key)
    }

    /// Add a chest holding a hidden treasure. Returns the treasure's id.
    pub fn add_chest(&mut self, position: Vec3) -> ItemId {
        let treasure = self.configured(Collectible::treasure(self.ids.next_item(), position).hidden());
        let id = self.add_collectible(treasure);
        self.add_interactable(position, Chest::new(id));
        id
    }

    fn configured(&self, collectible: Collectible) -> Collectible {
        collectible
            .with_radius(self.pickup.radius)
            .with_pickup_delay(self.pickup.delay)
    }

    /// Place a door, switch or other interactable
    pub fn add_interactable(&mut self, position: Vec3, object: impl Interactable + 'static) {
        self.interactables.push(Placed {
            position,
            object: Box::new(object),
        });
    }

    /// Set the zone the player walks into to end the level
    pub fn set_finish_zone(&mut self, center: Vec3, radius: f32) {
        self.finish = Some(FinishZone {
            center,
            radius,
            player_inside: false,
        });
    }

    /// Add an objective, in declaration order
    pub fn add_objective(&mut self, objective: impl Objective + 'static) {
        self.run.push(Box::new(objective));
    }

    /// Begin the run: objectives start listening
    pub fn start(&mut self) {
        self.run.start();
        log::info!(
            "Level '{}' started: {} enemies, {} collectibles, {} objectives",
            self.level_id,
            self.enemies.len(),
            self.collectibles.len(),
            self.run.objectives().len()
        );
    }

    // ---- Player input ----

    /// Move the player
    pub fn move_player(&mut self, position: Vec3) {
        if self.player.is_alive() {
            self.player.position = position;
            self.systems.world.set_position(self.player.body(), position);
        }
    }

    /// Turn the player
    pub fn face(&mut self, forward: Vec3) {
        if let Some(forward) = math::normalize(forward) {
            self.player.forward = forward;
        }
    }

    /// Pull the trigger and resolve the hitscan
    pub fn fire(&mut self) -> ShotReport {
        if !self.player.is_alive() || self.is_finished() {
            return ShotReport::Blocked;
        }

        let recoil = match self.player.gun.shoot(self.systems.cues.now()) {
            ShotOutcome::Fired { recoil } => recoil,
            ShotOutcome::DryFire => return ShotReport::DryFire,
            ShotOutcome::Blocked => return ShotReport::Blocked,
        };

        let stats = self.player.gun.stats();
        let options = RaycastOptions::default()
            .with_max_distance(stats.range)
            .with_mask(self.systems.perception.config().mask)
            .exclude(self.player.body());
        let damage = stats.damage;

        let Some(hit) = hitscan(
            &self.systems.world,
            self.player.position,
            self.player.forward,
            recoil,
            &options,
        ) else {
            return ShotReport::Missed;
        };

        let Some(slot) = self
            .enemies
            .iter_mut()
            .find(|slot| slot.entity.body() == hit.body && slot.entity.is_alive())
        else {
            return ShotReport::Missed;
        };

        let roster = Roster {
            player: self.player.view(),
        };
        let mut ctx = self.systems.combat(&roster);
        let info = DamageInfo::new(damage)
            .with_source(self.player.id())
            .with_hit_point(hit.point);
        let outcome = slot.entity.apply_damage(info, &mut ctx);

        let enemy = slot.entity.id();
        if outcome == DamageOutcome::Killed {
            slot.zones.reset();
            self.systems.world.set_enabled(slot.entity.body(), false);
            self.systems.mover.remove(enemy);
        }
        ShotReport::Hit { enemy, outcome }
    }

    /// Let go of the trigger
    pub fn release_trigger(&mut self) {
        self.player.gun.release_trigger();
    }

    /// Start a reload
    pub fn reload(&mut self) -> bool {
        self.player.is_alive() && self.player.gun.reload()
    }

    /// Reload animation finished
    pub fn finish_reload(&mut self) {
        self.player.gun.reload_complete();
    }

    /// Use the nearest interactable in front of the player
    pub fn interact(&mut self) -> Option<Interaction> {
        if !self.player.is_alive() || self.is_finished() {
            return None;
        }

        let origin = self.player.position;
        let forward = self.player.forward;
        let (index, _) = self
            .interactables
            .iter()
            .enumerate()
            .filter_map(|(i, placed)| {
                let offset = math::sub(placed.position, origin);
                let distance = math::length(offset);
                let in_front = math::dot(offset, forward) >= 0.0;
                (distance <= INTERACT_REACH && in_front).then_some((i, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let interaction = self.interactables[index].object.interact(&self.player.inventory);
        match interaction {
            Interaction::Opened(Some(body)) | Interaction::Activated(Some(body)) => {
                self.systems.world.set_enabled(body, false);
            }
            Interaction::Closed(Some(body)) => {
                self.systems.world.set_enabled(body, true);
            }
            Interaction::Revealed(item) => {
                if let Some(collectible) = self.collectibles.iter_mut().find(|c| c.id == item) {
                    collectible.reveal();
                }
            }
            _ => {}
        }
        log::debug!("Interaction: {:?}", interaction);
        Some(interaction)
    }

    /// Deliver a trigger command to an enemy on the next tick
    pub fn notify(&mut self, enemy: EntityId, command: CombatCommand) {
        self.queued.push((enemy, command));
    }

    // ---- Frame ----

    /// Advance the level by one frame. Returns the run result on the frame
    /// the level ends.
    pub fn tick(
        &mut self,
        delta_time: f32,
        session: &mut GameSession,
        scenes: &mut dyn SceneTransition,
    ) -> Option<(RunResult, RecordOutcome)> {
        if self.is_finished() {
            return None;
        }

        self.run_deferred(delta_time);
        self.sync_bodies(delta_time);

        let mut hits = self.run_zone_commands();
        hits.extend(self.run_enemies());
        self.apply_hits(hits);

        self.check_pickups();
        let finished = self.check_finish(session, scenes);

        self.timer.tick(delta_time);
        self.player.gun.update(delta_time);
        finished
    }

    fn run_deferred(&mut self, delta_time: f32) {
        for cue in self.systems.cues.advance(delta_time) {
            match cue {
                CombatCue::EndFlash(id) => {
                    if let Some(slot) = self.enemies.iter_mut().find(|s| s.entity.id() == id) {
                        slot.entity.end_flash();
                    }
                }
                CombatCue::EndInvulnerability(id) => {
                    if id == self.player.id() {
                        self.player.end_invulnerability();
                    }
                }
            }
        }

        for cue in self.pickup_cues.advance(delta_time) {
            let PickupCue::Complete { item, picker } = cue;
            if let Some(collectible) = self.collectibles.iter_mut().find(|c| c.id == item) {
                collectible.complete(picker, &self.systems.bus);
            }
        }
    }

    fn sync_bodies(&mut self, delta_time: f32) {
        self.systems.mover.step(delta_time);
        for slot in self.enemies.iter_mut().filter(|s| s.entity.is_alive()) {
            if let Some(position) = self.systems.mover.position(slot.entity.id()) {
                slot.entity.set_position(position);
                self.systems.world.set_position(slot.entity.body(), position);
            }
        }
        self.systems
            .world
            .set_position(self.player.body(), self.player.position);
    }

    fn run_zone_commands(&mut self) -> Vec<AttackHit> {
        let roster = Roster {
            player: self.player.view(),
        };
        let player = roster
            .player
            .alive
            .then_some((roster.player.id, roster.player.position));
        let queued = std::mem::take(&mut self.queued);

        let mut hits = Vec::new();
        for slot in self.enemies.iter_mut().filter(|s| s.entity.is_alive()) {
            let config = slot.entity.config();
            let mut commands = slot.zones.update(
                slot.entity.position(),
                config.alert_radius,
                config.attack_radius,
                player,
            );
            commands.extend(
                queued
                    .iter()
                    .filter(|(id, _)| *id == slot.entity.id())
                    .map(|(_, command)| *command),
            );

            let mut ctx = self.systems.combat(&roster);
            for command in commands {
                hits.extend(slot.entity.handle(command, &mut ctx));
            }
        }
        hits
    }

    fn run_enemies(&mut self) -> Vec<AttackHit> {
        let roster = Roster {
            player: self.player.view(),
        };
        let mut ctx = self.systems.combat(&roster);
        self.enemies
            .iter_mut()
            .filter_map(|slot| slot.entity.tick(&mut ctx))
            .collect()
    }

    fn apply_hits(&mut self, hits: Vec<AttackHit>) {
        for hit in hits {
            if hit.target != self.player.id() {
                continue;
            }
            let outcome =
                self.player
                    .apply_damage(hit.damage, &mut self.systems.cues, &self.systems.bus);
            if outcome == PlayerDamage::Killed {
                log::info!("Player killed by {}", hit.attacker);
                break;
            }
        }
    }

    fn check_pickups(&mut self) {
        if !self.player.is_alive() {
            return;
        }
        let position = self.player.position;
        for collectible in self.collectibles.iter_mut().filter(|c| c.in_range(position)) {
            collectible.claim(
                self.player.id(),
                &mut self.player.inventory,
                &mut self.pickup_cues,
            );
        }
    }

    fn check_finish(
        &mut self,
        session: &mut GameSession,
        scenes: &mut dyn SceneTransition,
    ) -> Option<(RunResult, RecordOutcome)> {
        let reached = match self.finish.as_mut() {
            Some(zone) => {
                let inside = self.player.is_alive()
                    && math::distance(zone.center, self.player.position) <= zone.radius;
                let entered = inside && !zone.player_inside;
                zone.player_inside = inside;
                entered
            }
            None => false,
        };

        if !reached && self.player.is_alive() {
            return None;
        }

        let finished = self.run.trigger_finish(&self.timer, session, scenes);
        if finished.is_some() {
            self.timer.stop();
            self.teardown();
        }
        finished
    }

    /// Drop pending deferred work and stop listening for events
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        for collectible in &mut self.collectibles {
            collectible.teardown();
        }
        for slot in &mut self.enemies {
            slot.entity.deactivate();
        }
        self.player.teardown();
        self.run.stop();
        log::debug!("Arena for '{}' torn down", self.level_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypt_combat::{CombatState, EntityKilled};
    use crypt_gamestate::{KillAllObjective, LevelRecord, ProgressStore, SceneLog};
    use crypt_inventory::{Door, PickupState};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn session() -> (GameSession, SceneLog) {
        let mut store = ProgressStore::new();
        store.register(LevelRecord::new("test", "Test Crypt")).unwrap();
        let mut session = GameSession::new(store);
        let mut scenes = SceneLog::new();
        session.play_level("test", &mut scenes).unwrap();
        (session, scenes)
    }

    fn arena(config: &GameConfig) -> Arena {
        Arena::new("test", config, EventBus::shared()).unwrap()
    }

    #[test]
    fn test_enemy_alerts_and_pursues() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]);
        arena.start();

        arena.tick(0.1, &mut session, &mut scenes);
        let enemy = arena.enemy(ghoul).unwrap();
        assert_eq!(enemy.state(), CombatState::Pursuing);
        assert_eq!(enemy.current_target(), Some(arena.player().id()));

        arena.tick(1.0, &mut session, &mut scenes);
        assert!(arena.enemy(ghoul).unwrap().position()[2] < 8.0);
    }

    #[test]
    fn test_wall_blocks_sight() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]);
        arena.add_wall([0.0, 0.0, 4.0], [2.0, 2.0, 0.2]);
        arena.start();

        arena.tick(0.1, &mut session, &mut scenes);
        let enemy = arena.enemy(ghoul).unwrap();
        assert_eq!(enemy.state(), CombatState::Alerted);
        assert_eq!(enemy.current_target(), None);
    }

    #[test]
    fn test_shooting_kills_enemy() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]);
        arena.add_objective(KillAllObjective::new("Slay", [ghoul]));
        arena.start();

        assert_eq!(
            arena.fire(),
            ShotReport::Hit {
                enemy: ghoul,
                outcome: DamageOutcome::Killed
            }
        );
        assert!(!arena.enemy(ghoul).unwrap().is_alive());
        assert_eq!(arena.run().check_objectives(), vec![true]);

        // The corpse no longer blocks shots
        arena.release_trigger();
        arena.tick(1.0, &mut session, &mut scenes);
        assert_eq!(arena.fire(), ShotReport::Missed);
    }

    #[test]
    fn test_retaliation_without_sight() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        // Outside both trigger zones
        let brute = arena.spawn_enemy_with(
            "brute",
            [0.0, 0.0, 30.0],
            EnemyConfig::default().with_max_health(3),
        );
        arena.start();

        assert_eq!(
            arena.fire(),
            ShotReport::Hit {
                enemy: brute,
                outcome: DamageOutcome::Damaged { remaining: 2 }
            }
        );
        let enemy = arena.enemy(brute).unwrap();
        assert!(enemy.is_flashing());
        assert_eq!(enemy.current_target(), Some(arena.player().id()));
        assert_eq!(enemy.state(), CombatState::Pursuing);

        arena.tick(0.1, &mut session, &mut scenes);
        assert!(!arena.enemy(brute).unwrap().is_flashing());

        arena.tick(1.0, &mut session, &mut scenes);
        assert!(arena.enemy(brute).unwrap().position()[2] < 30.0);
    }

    #[test]
    fn test_door_with_key() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        let key = arena.add_key([0.0, 0.0, -5.0]);
        let door_body = arena.add_wall([0.0, 0.0, 2.0], [1.0, 1.5, 0.1]);
        arena.add_interactable([0.0, 0.0, 2.0], Door::new().with_key(key).with_body(door_body));
        arena.start();

        assert_eq!(arena.interact(), Some(Interaction::Locked));

        arena.move_player([0.0, 0.0, -5.0]);
        arena.tick(0.1, &mut session, &mut scenes);
        assert!(arena.player().inventory.contains(key));
        assert_eq!(arena.collectible(key).unwrap().state(), PickupState::Claimed);

        arena.move_player([0.0, 0.0, 0.0]);
        assert_eq!(arena.interact(), Some(Interaction::Opened(Some(door_body))));
        assert!(!arena.world().get(door_body).unwrap().enabled);
        assert_eq!(arena.interact(), Some(Interaction::Closed(Some(door_body))));
        assert!(arena.world().get(door_body).unwrap().enabled);

        arena.face([0.0, 0.0, -1.0]);
        assert_eq!(arena.interact(), None);
    }

    #[test]
    fn test_chest_reveals_treasure() {
        let (mut session, mut scenes) = session();
        let mut arena = arena(&GameConfig::default());
        let treasure = arena.add_chest([0.0, 0.0, 2.0]);
        arena.start();

        arena.move_player([0.0, 0.0, 1.5]);
        arena.tick(0.1, &mut session, &mut scenes);
        assert_eq!(arena.collectible(treasure).unwrap().state(), PickupState::Hidden);

        assert_eq!(arena.interact(), Some(Interaction::Revealed(treasure)));
        arena.tick(0.1, &mut session, &mut scenes);
        assert_eq!(arena.collectible(treasure).unwrap().state(), PickupState::Claimed);
    }

    #[test]
    fn test_player_death_ends_run() {
        let (mut session, mut scenes) = session();
        let mut config = GameConfig::default();
        config.player.max_health = 1;
        let mut arena = arena(&config);
        let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 2.5]);
        arena.add_objective(KillAllObjective::new("Slay", [ghoul]));
        arena.start();

        let deaths = Arc::new(AtomicU32::new(0));
        let counter = deaths.clone();
        arena.bus().subscribe(move |_: &EntityKilled| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let (result, _) = arena.tick(0.1, &mut session, &mut scenes).unwrap();
        assert!(!arena.player().is_alive());
        assert!(!result.all_complete);
        assert_eq!(result.objective_results, vec![false]);
        assert_eq!(deaths.load(Ordering::SeqCst), 1);

        assert!(arena.is_finished());
        assert!(arena.tick(0.1, &mut session, &mut scenes).is_none());
        assert_eq!(arena.fire(), ShotReport::Blocked);
    }
}
