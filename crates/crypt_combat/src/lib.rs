//! # crypt_combat - Enemies, Health and Weapons
//!
//! # Features
//!
//! - Hostile entity state machine: Idle, Alerted, Pursuing, Attacking, Dead
//! - Integer health with "damage >= health is lethal" semantics
//! - Exactly-once `EntityKilled` events on the event bus
//! - Closed `CombatCommand` set for trigger-zone notifications
//! - `Navigator` and `ActorLookup` collaborator traits
//! - The player actor with an invulnerability window, inventory and gun
//! - Semi/automatic gun with magazine, reserve, reload and recoil
//!
//! # Example
//!
//! ```ignore
//! use crypt_combat::prelude::*;
//!
//! let mut enemy = CombatEntity::new(id, body, [0.0, 0.0, 0.0], EnemyConfig::default());
//! let mut ctx = CombatContext { perception: &perception, world: &world, actors: &actors,
//!     bus: &bus, nav: &mut nav, cues: &mut cues };
//!
//! enemy.handle(CombatCommand::AlertEnter(player_id), &mut ctx);
//! enemy.tick(&mut ctx);
//! enemy.apply_damage(DamageInfo::new(1).with_source(player_id), &mut ctx);
//! ```

pub mod actor;
pub mod command;
pub mod cue;
pub mod damage;
pub mod enemy;
pub mod events;
pub mod health;
pub mod navigation;
pub mod player;
pub mod weapon;

pub mod prelude {
    pub use crate::actor::{ActorLookup, ActorView};
    pub use crate::command::CombatCommand;
    pub use crate::cue::CombatCue;
    pub use crate::damage::DamageInfo;
    pub use crate::enemy::{
        AttackHit, CombatContext, CombatEntity, CombatState, DamageOutcome, EnemyConfig,
    };
    pub use crate::events::{EntityDamaged, EntityKilled};
    pub use crate::health::{Health, HealthChange};
    pub use crate::navigation::{NavRequest, Navigator, RecordingNavigator};
    pub use crate::player::{Player, PlayerConfig, PlayerDamage};
    pub use crate::weapon::{aim, hitscan, Gun, GunStats, ShotOutcome};
}

pub use prelude::*;
