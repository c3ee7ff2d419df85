//! Hostile entity state machine
//!
//! ```text
//!          AlertEnter            visible (tick)          AttackEnter + visible
//!   Idle ───────────► Alerted ─────────────────► Pursuing ─────────────────► Attacking
//!    ▲                   │                          ▲                            │
//!    └──── AlertExit ────┴──────────────────────────┴──── player not found ◄─────┘
//!
//!   any state except Dead ── damage >= health ──► Dead (terminal)
//! ```
//!
//! Every external input goes through [`CombatEntity::handle`],
//! [`CombatEntity::tick`] or [`CombatEntity::apply_damage`]; a dead entity
//! ignores all of them.

use crate::actor::{ActorLookup, ActorView};
use crate::command::CombatCommand;
use crate::cue::CombatCue;
use crate::damage::DamageInfo;
use crate::events::{EntityDamaged, EntityKilled};
use crate::health::{Health, HealthChange};
use crate::navigation::Navigator;
use crypt_core::math::Vec3;
use crypt_core::{BodyId, EntityId, Lifeline, Scheduler};
use crypt_event::EventBus;
use crypt_perception::{PerceptionService, RayQuery};
use serde::{Deserialize, Serialize};

/// Enemy tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Starting and maximum health
    pub max_health: u32,
    /// Damage dealt per attack
    pub attack_damage: u32,
    /// Radius scanned for the player when an attack resolves
    pub attack_radius: f32,
    /// Radius of the alert trigger zone
    pub alert_radius: f32,
    /// Base movement speed
    pub speed: f32,
    /// Seconds between attack resolutions while attacking
    pub attack_interval: f32,
    /// Duration of the damage flash
    pub flash_duration: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 1,
            attack_damage: 1,
            attack_radius: 3.0,
            alert_radius: 10.0,
            speed: 3.5,
            attack_interval: 1.0,
            flash_duration: 0.05,
        }
    }
}

impl EnemyConfig {
    /// Set max health
    pub fn with_max_health(mut self, health: u32) -> Self {
        self.max_health = health;
        self
    }

    /// Set attack damage
    pub fn with_attack_damage(mut self, damage: u32) -> Self {
        self.attack_damage = damage;
        self
    }

    /// Set attack radius
    pub fn with_attack_radius(mut self, radius: f32) -> Self {
        self.attack_radius = radius;
        self
    }

    /// Set alert radius
    pub fn with_alert_radius(mut self, radius: f32) -> Self {
        self.alert_radius = radius;
        self
    }

    /// Set base speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set time between attacks
    pub fn with_attack_interval(mut self, interval: f32) -> Self {
        self.attack_interval = interval;
        self
    }
}

/// Enemy state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Idle,
    Alerted,
    Pursuing,
    Attacking,
    Dead,
}

/// Result of applying damage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead
    Ignored,
    /// Survived with `remaining` health
    Damaged { remaining: u32 },
    /// This hit was lethal
    Killed,
}

/// A resolved attack on the player, applied by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackHit {
    pub attacker: EntityId,
    pub target: EntityId,
    pub damage: DamageInfo,
}

/// Collaborators an enemy talks to while processing an input
pub struct CombatContext<'a> {
    pub perception: &'a PerceptionService,
    pub world: &'a dyn RayQuery,
    pub actors: &'a dyn ActorLookup,
    pub bus: &'a EventBus,
    pub nav: &'a mut dyn Navigator,
    pub cues: &'a mut Scheduler<CombatCue>,
}

impl CombatContext<'_> {
    /// Current game time
    pub fn now(&self) -> f64 {
        self.cues.now()
    }
}

/// A hostile entity
#[derive(Debug)]
pub struct CombatEntity {
    id: EntityId,
    name: String,
    body: BodyId,
    position: Vec3,
    config: EnemyConfig,
    health: Health,
    state: CombatState,
    previous_state: Option<CombatState>,
    /// Actor noticed in the alert zone, not yet seen
    pending: Option<EntityId>,
    current_target: Option<EntityId>,
    attack_cooldown_until: f64,
    flashing: bool,
    flash: Lifeline,
    active: bool,
}

impl CombatEntity {
    /// Create a new enemy
    pub fn new(id: EntityId, body: BodyId, position: Vec3, config: EnemyConfig) -> Self {
        Self {
            id,
            name: format!("Enemy {}", id.index()),
            body,
            position,
            health: Health::new(config.max_health),
            config,
            state: CombatState::Idle,
            previous_state: None,
            pending: None,
            current_target: None,
            attack_cooldown_until: 0.0,
            flashing: false,
            flash: Lifeline::new(),
            active: true,
        }
    }

    /// Set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Update position (from the navigation collaborator)
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn previous_state(&self) -> Option<CombatState> {
        self.previous_state
    }

    pub fn current_target(&self) -> Option<EntityId> {
        self.current_target
    }

    pub fn pending_target(&self) -> Option<EntityId> {
        self.pending
    }

    pub fn attack_cooldown_until(&self) -> f64 {
        self.attack_cooldown_until
    }

    pub fn is_alive(&self) -> bool {
        self.state != CombatState::Dead
    }

    /// False once the entity has been removed from play
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    /// Process a trigger notification
    pub fn handle(&mut self, command: CombatCommand, ctx: &mut CombatContext<'_>) -> Option<AttackHit> {
        if !self.is_alive() {
            log::trace!("{} ignoring {:?} (dead)", self.name, command);
            return None;
        }

        match command {
            CombatCommand::AlertEnter(actor) => {
                if self.current_target.is_none() {
                    self.pending = Some(actor);
                    if self.state == CombatState::Idle {
                        self.transition(CombatState::Alerted);
                    }
                }
                None
            }
            CombatCommand::AttackEnter(actor) => {
                if !self.can_see(actor, ctx) {
                    return None;
                }
                if self.current_target.is_none() {
                    self.current_target = Some(actor);
                }
                ctx.nav.set_speed(self.id, 0.0);
                self.transition(CombatState::Attacking);
                self.attack_cooldown_until = ctx.now() + self.config.attack_interval as f64;
                self.resolve_attack(ctx)
            }
            CombatCommand::AlertExit => {
                self.pending = None;
                self.current_target = None;
                ctx.nav.halt(self.id);
                ctx.nav.set_speed(self.id, self.config.speed);
                self.transition(CombatState::Idle);
                None
            }
            CombatCommand::AttackCue => {
                if self.state == CombatState::Attacking {
                    self.resolve_attack(ctx)
                } else {
                    None
                }
            }
        }
    }

    /// Per-frame update: perception, then navigation, then attack cooldown
    pub fn tick(&mut self, ctx: &mut CombatContext<'_>) -> Option<AttackHit> {
        if !self.is_alive() {
            return None;
        }

        // Perception: commit the pending candidate once it is in sight
        if let Some(candidate) = self.pending {
            match ctx.actors.actor(candidate).filter(|view| view.alive) {
                Some(view) => {
                    if self.sees(&view, ctx) {
                        self.pending = None;
                        self.current_target = Some(candidate);
                        if matches!(self.state, CombatState::Idle | CombatState::Alerted) {
                            self.transition(CombatState::Pursuing);
                        }
                    }
                }
                None => {
                    self.pending = None;
                    if self.state == CombatState::Alerted {
                        self.transition(CombatState::Idle);
                    }
                }
            }
        }

        // Navigation: follow the target, drop it if it is gone
        if let Some(target) = self.current_target {
            match ctx.actors.actor(target).filter(|view| view.alive) {
                Some(view) => ctx.nav.set_destination(self.id, view.position),
                None => {
                    log::debug!("{} lost its target {}", self.name, target);
                    self.current_target = None;
                    ctx.nav.halt(self.id);
                    ctx.nav.set_speed(self.id, self.config.speed);
                    self.transition(if self.pending.is_some() {
                        CombatState::Alerted
                    } else {
                        CombatState::Idle
                    });
                }
            }
        }

        // Attack cooldown
        if self.state == CombatState::Attacking && ctx.now() >= self.attack_cooldown_until {
            self.attack_cooldown_until = ctx.now() + self.config.attack_interval as f64;
            return self.resolve_attack(ctx);
        }

        None
    }

    /// Apply damage from an attacker. Lethal damage kills the entity and
    /// publishes [`EntityKilled`] exactly once; otherwise an entity without a
    /// target turns on its attacker, seen or not.
    pub fn apply_damage(&mut self, damage: DamageInfo, ctx: &mut CombatContext<'_>) -> DamageOutcome {
        if !self.is_alive() {
            log::trace!("{} ignoring damage (dead)", self.name);
            return DamageOutcome::Ignored;
        }

        self.start_flash(ctx.cues);

        match self.health.apply(damage.amount) {
            HealthChange::Depleted => {
                self.die(damage.source, ctx);
                DamageOutcome::Killed
            }
            HealthChange::Reduced { remaining } => {
                log::debug!("{} hit for {}, {} left", self.name, damage.amount, remaining);
                ctx.bus.publish(EntityDamaged {
                    entity: self.id,
                    amount: damage.amount,
                    remaining,
                    max: self.health.max(),
                });

                if self.current_target.is_none() {
                    if let Some(attacker) = damage.source {
                        self.current_target = Some(attacker);
                        if self.state != CombatState::Attacking {
                            self.transition(CombatState::Pursuing);
                        }
                    }
                }
                DamageOutcome::Damaged { remaining }
            }
        }
    }

    /// Damage flash is over
    pub fn end_flash(&mut self) {
        self.flashing = false;
    }

    /// Remove from play: pending deferred actions are dropped
    pub fn deactivate(&mut self) {
        self.active = false;
        self.flashing = false;
        self.flash.sever();
    }

    /// Scan the attack radius for the player and hit it if visible. If the
    /// player is gone the entity goes back to pursuing at base speed.
    fn resolve_attack(&mut self, ctx: &mut CombatContext<'_>) -> Option<AttackHit> {
        if !self.is_alive() {
            return None;
        }

        match ctx.actors.player_in_radius(self.position, self.config.attack_radius) {
            Some(player) => {
                if !self.can_see(player, ctx) {
                    // Remember the player so sight regained later starts pursuit
                    if self.current_target.is_none() {
                        self.pending = Some(player);
                    }
                    return None;
                }
                log::debug!("{} attacks {}", self.name, player);
                Some(AttackHit {
                    attacker: self.id,
                    target: player,
                    damage: DamageInfo::new(self.config.attack_damage)
                        .with_source(self.id)
                        .with_hit_point(self.position),
                })
            }
            None => {
                ctx.nav.set_speed(self.id, self.config.speed);
                if self.state == CombatState::Attacking {
                    self.transition(if self.current_target.is_some() {
                        CombatState::Pursuing
                    } else if self.pending.is_some() {
                        CombatState::Alerted
                    } else {
                        CombatState::Idle
                    });
                }
                None
            }
        }
    }

    fn die(&mut self, killer: Option<EntityId>, ctx: &mut CombatContext<'_>) {
        self.transition(CombatState::Dead);
        self.current_target = None;
        self.pending = None;
        ctx.nav.set_speed(self.id, 0.0);
        ctx.nav.halt(self.id);
        self.deactivate();

        log::info!("{} killed", self.name);
        ctx.bus.publish(EntityKilled {
            entity: self.id,
            killer,
        });
    }

    fn start_flash(&mut self, cues: &mut Scheduler<CombatCue>) {
        self.flash.renew();
        self.flashing = true;
        cues.schedule(
            self.config.flash_duration,
            self.flash.guard(),
            CombatCue::EndFlash(self.id),
        );
    }

    fn can_see(&self, actor: EntityId, ctx: &CombatContext<'_>) -> bool {
        match ctx.actors.actor(actor).filter(|view| view.alive) {
            Some(view) => self.sees(&view, ctx),
            None => false,
        }
    }

    fn sees(&self, view: &ActorView, ctx: &CombatContext<'_>) -> bool {
        ctx.perception
            .is_visible(ctx.world, self.position, Some(self.body), Some(view.sight_target()))
    }

    fn transition(&mut self, to: CombatState) {
        if self.state != to {
            log::debug!("{}: {:?} -> {:?}", self.name, self.state, to);
            self.previous_state = Some(self.state);
            self.state = to;
        }
    }
}
