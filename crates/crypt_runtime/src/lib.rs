//! # crypt_runtime - Level Runtime
//!
//! Puts the gameplay crates together into a playable level.
//!
//! # Features
//!
//! - TOML configuration with defaults for every section
//! - `Arena` owning one level's world, player, enemies, pickups and objectives
//! - Fixed per-frame ordering of deferred actions, perception and combat
//! - Edge-detected alert and attack zones around enemies
//! - Straight-line mover standing in for navigation
//!
//! # Example
//!
//! ```ignore
//! use crypt_runtime::prelude::*;
//!
//! let config = GameConfig::load()?;
//! let mut arena = Arena::new("crypt_1", &config, EventBus::shared())?;
//! let ghoul = arena.spawn_enemy("ghoul", [0.0, 0.0, 8.0]);
//! arena.add_objective(KillAllObjective::new("Slay the ghoul", [ghoul]));
//! arena.set_finish_zone([0.0, 0.0, 20.0], 1.5);
//! arena.start();
//!
//! loop {
//!     if let Some((result, _)) = arena.tick(1.0 / 60.0, &mut session, &mut scenes) {
//!         break;
//!     }
//! }
//! ```

pub mod arena;
pub mod config;
pub mod mover;
pub mod zones;

pub mod prelude {
    pub use crate::arena::{Arena, ShotReport, ACTOR_RADIUS, INTERACT_REACH};
    pub use crate::config::{
        ConfigError, GameConfig, LevelEntry, PerceptionSection, PickupSection, CONFIG_ENV,
    };
    pub use crate::mover::StraightMover;
    pub use crate::zones::EnemyZones;

    pub use crypt_event::EventBus;
    pub use crypt_gamestate::{
        CollectAllObjective, GameSession, KillAllObjective, SceneLog, SceneTransition,
    };
}

pub use prelude::*;
