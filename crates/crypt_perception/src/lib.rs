//! # crypt_perception - Sight and Ray Queries
//!
//! Line-of-sight for hostile entities and hitscan for the player's weapon.
//!
//! # Features
//!
//! - Collision layers and layer masks, resolvable from names
//! - `RayQuery` collaborator trait: "what does this ray hit first"
//! - `PerceptionService`: visible iff the first hit is the target's body
//! - `StaticWorld`: sphere and box bodies implementing `RayQuery`
//!
//! # Example
//!
//! ```ignore
//! use crypt_perception::prelude::*;
//!
//! let mut world = StaticWorld::new();
//! let player = world.add(Body::new(BodyShape::sphere(0.5), [10.0, 0.0, 0.0], CollisionLayer::PLAYER));
//!
//! let perception = PerceptionService::default();
//! let target = SightTarget { body: player, position: [10.0, 0.0, 0.0] };
//! assert!(perception.is_visible(&world, [0.0, 0.0, 0.0], None, Some(target)));
//! ```

pub mod layers;
pub mod perception;
pub mod query;
pub mod world;

pub mod prelude {
    pub use crate::layers::{CollisionLayer, LayerMask, LayerRegistry, UnknownLayer};
    pub use crate::perception::{PerceptionConfig, PerceptionService, SightTarget};
    pub use crate::query::{RayQuery, RaycastHit, RaycastOptions};
    pub use crate::world::{Body, BodyShape, StaticWorld};
}

pub use prelude::*;
