//! Read-only views of actors, looked up by id

use crypt_core::math::Vec3;
use crypt_core::{BodyId, EntityId};
use crypt_perception::SightTarget;

/// Snapshot of an actor as seen by a hostile entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub id: EntityId,
    pub position: Vec3,
    pub body: BodyId,
    pub alive: bool,
}

impl ActorView {
    /// Ray target for line-of-sight checks
    pub fn sight_target(&self) -> SightTarget {
        SightTarget {
            body: self.body,
            position: self.position,
        }
    }
}

/// Registry of actors an enemy may target
pub trait ActorLookup {
    /// Look up an actor; `None` if it no longer exists
    fn actor(&self, id: EntityId) -> Option<ActorView>;

    /// The player, if inside the sphere
    fn player_in_radius(&self, center: Vec3, radius: f32) -> Option<EntityId>;
}
