//! The player's gun

use crypt_core::math::Vec3;
use crypt_perception::{RayQuery, RaycastHit, RaycastOptions};
use serde::{Deserialize, Serialize};

/// Gun statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunStats {
    /// Keep firing while the trigger is held
    pub automatic: bool,
    /// Shots per second
    pub fire_rate: f32,
    /// Rounds per magazine
    pub magazine_size: u32,
    /// Rounds carried outside the magazine
    pub reserve_ammo: u32,
    /// Reloads never consume reserve ammo
    pub infinite_ammo: bool,
    /// Damage per hit
    pub damage: u32,
    /// Hitscan range
    pub range: f32,
    /// Recoil added per shot
    pub recoil: f32,
    /// Recoil removed per second
    pub recoil_decay: f32,
}

impl Default for GunStats {
    fn default() -> Self {
        Self {
            automatic: false,
            fire_rate: 5.0,
            magazine_size: 13,
            reserve_ammo: 100,
            infinite_ammo: false,
            damage: 1,
            range: 100.0,
            recoil: 1.0,
            recoil_decay: 20.0,
        }
    }
}

/// Result of pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// A round was fired with the recoil at the moment of firing
    Fired { recoil: f32 },
    /// Magazine empty
    DryFire,
    /// Reloading, cooling down, or waiting for the trigger to be released
    Blocked,
}

/// Gun state
#[derive(Debug, Clone)]
pub struct Gun {
    stats: GunStats,
    ammo_in_magazine: u32,
    reserve: u32,
    next_fire_time: f64,
    recoil: f32,
    reloading: bool,
    /// Semi-automatic guns latch after each pull until released
    trigger_ready: bool,
}

impl Gun {
    /// Create a gun with a full magazine
    pub fn new(stats: GunStats) -> Self {
        Self {
            ammo_in_magazine: stats.magazine_size,
            reserve: stats.reserve_ammo,
            stats,
            next_fire_time: 0.0,
            recoil: 0.0,
            reloading: false,
            trigger_ready: true,
        }
    }

    pub fn stats(&self) -> &GunStats {
        &self.stats
    }

    pub fn ammo_in_magazine(&self) -> u32 {
        self.ammo_in_magazine
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn recoil(&self) -> f32 {
        self.recoil
    }

    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    /// Pull the trigger at game time `now`
    pub fn shoot(&mut self, now: f64) -> ShotOutcome {
        let trigger_ready = self.trigger_ready || self.stats.automatic;

        let outcome = if self.ammo_in_magazine > 0
            && !self.reloading
            && now >= self.next_fire_time
            && trigger_ready
        {
            let recoil = self.recoil;
            self.next_fire_time = now + 1.0 / self.stats.fire_rate as f64;
            self.recoil += self.stats.recoil;
            self.ammo_in_magazine -= 1;
            ShotOutcome::Fired { recoil }
        } else if self.ammo_in_magazine == 0 && trigger_ready {
            ShotOutcome::DryFire
        } else {
            ShotOutcome::Blocked
        };

        if !self.stats.automatic {
            self.trigger_ready = false;
        }
        outcome
    }

    /// The trigger was let go
    pub fn release_trigger(&mut self) {
        self.trigger_ready = true;
    }

    /// A reload needs spare ammo, room in the magazine and no reload in progress
    pub fn can_reload(&self) -> bool {
        (self.reserve > 0 || self.stats.infinite_ammo)
            && self.ammo_in_magazine < self.stats.magazine_size
            && !self.reloading
    }

    /// Refill the magazine from the reserve. The gun stays unusable until
    /// [`Gun::reload_complete`]. Returns false if a reload is not possible.
    pub fn reload(&mut self) -> bool {
        if !self.can_reload() {
            return false;
        }

        self.reloading = true;
        let missing = self.stats.magazine_size - self.ammo_in_magazine;
        if self.stats.infinite_ammo {
            self.ammo_in_magazine = self.stats.magazine_size;
        } else {
            let taken = missing.min(self.reserve);
            self.reserve -= taken;
            self.ammo_in_magazine += taken;
        }
        log::debug!(
            "Reloaded: {}/{} ({} in reserve)",
            self.ammo_in_magazine,
            self.stats.magazine_size,
            self.reserve
        );
        true
    }

    /// Reload animation finished
    pub fn reload_complete(&mut self) {
        self.reloading = false;
    }

    /// Decay recoil
    pub fn update(&mut self, delta_time: f32) {
        self.recoil = (self.recoil - self.stats.recoil_decay * delta_time).max(0.0);
    }

    /// Ammo display string
    pub fn ammo_display(&self) -> String {
        format!("{}/{}", self.ammo_in_magazine, self.stats.magazine_size)
    }
}

impl Default for Gun {
    fn default() -> Self {
        Self::new(GunStats::default())
    }
}

/// Direction of a shot: `forward` kicked upward by the recoil at firing time
pub fn aim(forward: Vec3, recoil: f32) -> Vec3 {
    [forward[0], forward[1] + recoil * 0.5, forward[2]]
}

/// Trace a hitscan shot and return the first body hit
pub fn hitscan(
    world: &dyn RayQuery,
    origin: Vec3,
    forward: Vec3,
    recoil: f32,
    options: &RaycastOptions,
) -> Option<RaycastHit> {
    world.cast_ray(origin, aim(forward, recoil), options)
}
