//! Line-of-sight perception

use crate::layers::LayerMask;
use crate::query::{RayQuery, RaycastOptions};
use crypt_core::math::{self, Vec3};
use crypt_core::BodyId;
use serde::{Deserialize, Serialize};

/// Perception configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerceptionConfig {
    /// Maximum sight distance
    pub range: f32,
    /// Layers that take part in sight rays (occluders and targets)
    pub mask: LayerMask,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            range: 100.0,
            mask: LayerMask::sight(),
        }
    }
}

impl PerceptionConfig {
    /// Set sight range
    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    /// Set participating layers
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }
}

/// What the observer is looking for: a body at a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SightTarget {
    /// Collision body that counts as "the target"
    pub body: BodyId,
    /// Where to aim the ray
    pub position: Vec3,
}

/// Answers "can the observer see the target right now"
#[derive(Debug, Clone, Default)]
pub struct PerceptionService {
    config: PerceptionConfig,
}

impl PerceptionService {
    /// Create a new perception service
    pub fn new(config: PerceptionConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Cast a ray from `observer` toward the target. Visible only if the first
    /// body hit within range is the target's own body. A missing target, or a
    /// target at the observer's position, is not visible.
    ///
    /// `observer_body` is excluded so the observer does not occlude itself.
    pub fn is_visible(
        &self,
        world: &dyn RayQuery,
        observer: Vec3,
        observer_body: Option<BodyId>,
        target: Option<SightTarget>,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };

        let mut options = RaycastOptions::default()
            .with_max_distance(self.config.range)
            .with_mask(self.config.mask);
        if let Some(body) = observer_body {
            options = options.exclude(body);
        }

        let direction = math::sub(target.position, observer);
        let visible = world
            .cast_ray(observer, direction, &options)
            .is_some_and(|hit| hit.body == target.body);

        log::trace!("Sight check toward {:?}: {}", target.body, visible);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::CollisionLayer;
    use crate::world::{Body, BodyShape, StaticWorld};

    fn setup() -> (StaticWorld, BodyId, BodyId) {
        let mut world = StaticWorld::new();
        let enemy = world.add(Body::new(
            BodyShape::sphere(0.5),
            [0.0, 0.0, 0.0],
            CollisionLayer::ENEMIES,
        ));
        let player = world.add(Body::new(
            BodyShape::sphere(0.5),
            [10.0, 0.0, 0.0],
            CollisionLayer::PLAYER,
        ));
        (world, enemy, player)
    }

    #[test]
    fn test_clear_line_of_sight() {
        let (world, enemy, player) = setup();
        let perception = PerceptionService::default();
        let target = SightTarget {
            body: player,
            position: [10.0, 0.0, 0.0],
        };

        assert!(perception.is_visible(&world, [0.0; 3], Some(enemy), Some(target)));
        assert!(!perception.is_visible(&world, [0.0; 3], Some(enemy), None));
    }

    #[test]
    fn test_wall_occludes() {
        let (mut world, enemy, player) = setup();
        let wall = world.add(Body::new(
            BodyShape::cuboid(0.25, 2.0, 2.0),
            [5.0, 0.0, 0.0],
            CollisionLayer::ENVIRONMENT,
        ));
        let perception = PerceptionService::default();
        let target = Some(SightTarget {
            body: player,
            position: [10.0, 0.0, 0.0],
        });

        assert!(!perception.is_visible(&world, [0.0; 3], Some(enemy), target));

        // Walls outside the sight layers do not occlude
        let see_through = PerceptionService::new(
            PerceptionConfig::default().with_mask(LayerMask::sight().without(CollisionLayer::ENVIRONMENT)),
        );
        assert!(see_through.is_visible(&world, [0.0; 3], Some(enemy), target));

        world.remove(wall);
        assert!(perception.is_visible(&world, [0.0; 3], Some(enemy), target));
    }

    #[test]
    fn test_out_of_range() {
        let (world, enemy, player) = setup();
        let perception = PerceptionService::new(PerceptionConfig::default().with_range(5.0));
        let target = Some(SightTarget {
            body: player,
            position: [10.0, 0.0, 0.0],
        });

        assert!(!perception.is_visible(&world, [0.0; 3], Some(enemy), target));
    }

    #[test]
    fn test_other_body_first_is_not_visible() {
        let (mut world, enemy, player) = setup();
        world.add(Body::new(
            BodyShape::sphere(0.5),
            [4.0, 0.0, 0.0],
            CollisionLayer::ENEMIES,
        ));
        let perception = PerceptionService::default();
        let target = Some(SightTarget {
            body: player,
            position: [10.0, 0.0, 0.0],
        });

        assert!(!perception.is_visible(&world, [0.0; 3], Some(enemy), target));
    }
}
