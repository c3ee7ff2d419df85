//! A small static collision world
//!
//! Bodies are spheres (actors, props) or axis-aligned boxes (walls, doors).
//! Nothing is simulated; callers move bodies explicitly with
//! [`StaticWorld::set_position`] and the world only answers queries.

use crate::layers::{CollisionLayer, LayerMask};
use crate::query::{RayQuery, RaycastHit, RaycastOptions};
use crypt_core::math::{self, Vec3};
use crypt_core::BodyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shape of a collision body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyShape {
    /// Sphere centered on the body position
    Sphere { radius: f32 },
    /// Axis-aligned box centered on the body position
    Box { half_extents: Vec3 },
}

impl BodyShape {
    /// Sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Box shape
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }
}

/// A collision body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Shape
    pub shape: BodyShape,
    /// World position (center)
    pub position: Vec3,
    /// Layer membership
    pub layer: CollisionLayer,
    /// Disabled bodies are invisible to every query
    pub enabled: bool,
}

impl Body {
    /// Create an enabled body
    pub fn new(shape: BodyShape, position: Vec3, layer: CollisionLayer) -> Self {
        Self {
            shape,
            position,
            layer,
            enabled: true,
        }
    }

    /// Distance along a normalized ray to the first surface, or `None` if the
    /// ray misses or starts inside the body.
    fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match self.shape {
            BodyShape::Sphere { radius } => {
                let m = math::sub(origin, self.position);
                let b = math::dot(m, dir);
                let c = math::dot(m, m) - radius * radius;
                if c <= 0.0 || b > 0.0 {
                    return None;
                }
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                Some((-b - disc.sqrt()).max(0.0))
            }
            BodyShape::Box { half_extents } => {
                let mut t_min = 0.0f32;
                let mut t_max = f32::MAX;
                let mut inside = true;
                for axis in 0..3 {
                    let min = self.position[axis] - half_extents[axis];
                    let max = self.position[axis] + half_extents[axis];
                    let o = origin[axis];
                    if o < min || o > max {
                        inside = false;
                    }
                    if dir[axis].abs() < f32::EPSILON {
                        if o < min || o > max {
                            return None;
                        }
                        continue;
                    }
                    let inv = 1.0 / dir[axis];
                    let (t1, t2) = ((min - o) * inv, (max - o) * inv);
                    t_min = t_min.max(t1.min(t2));
                    t_max = t_max.min(t1.max(t2));
                    if t_min > t_max {
                        return None;
                    }
                }
                (!inside).then_some(t_min)
            }
        }
    }

    /// Check overlap with a sphere
    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        match self.shape {
            BodyShape::Sphere { radius: r } => math::distance(center, self.position) <= radius + r,
            BodyShape::Box { half_extents } => {
                let mut closest = center;
                for axis in 0..3 {
                    closest[axis] = closest[axis].clamp(
                        self.position[axis] - half_extents[axis],
                        self.position[axis] + half_extents[axis],
                    );
                }
                math::distance(center, closest) <= radius
            }
        }
    }
}

/// Collection of bodies answering ray and overlap queries
#[derive(Debug, Default)]
pub struct StaticWorld {
    bodies: BTreeMap<BodyId, Body>,
    next_index: u32,
}

impl StaticWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and return its id
    pub fn add(&mut self, body: Body) -> BodyId {
        let id = BodyId::from_index(self.next_index);
        self.next_index += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Remove a body
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        self.bodies.remove(&id)
    }

    /// Get a body
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Move a body. Returns false for an unknown id.
    pub fn set_position(&mut self, id: BodyId, position: Vec3) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    /// Enable or disable a body
    pub fn set_enabled(&mut self, id: BodyId, enabled: bool) -> bool {
        match self.bodies.get_mut(&id) {
            Some(body) => {
                body.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Check if the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bodies overlapping a sphere, in id order
    pub fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.enabled && mask.contains(body.layer))
            .filter(|(_, body)| body.overlaps_sphere(center, radius))
            .map(|(id, _)| *id)
            .collect()
    }
}

impl RayQuery for StaticWorld {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, options: &RaycastOptions) -> Option<RaycastHit> {
        let dir = math::normalize(direction)?;

        let mut best: Option<RaycastHit> = None;
        for (id, body) in &self.bodies {
            if !body.enabled || !options.mask.contains(body.layer) || options.exclude.contains(id) {
                continue;
            }
            let Some(distance) = body.ray_distance(origin, dir) else {
                continue;
            };
            if distance > options.max_distance {
                continue;
            }
            // Strictly closer wins; ties keep the lower id
            if best.map_or(true, |hit| distance < hit.distance) {
                best = Some(RaycastHit {
                    body: *id,
                    point: math::add(origin, math::scale(dir, distance)),
                    distance,
                    layer: body.layer,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sphere(world: &mut StaticWorld, pos: Vec3, layer: CollisionLayer) -> BodyId {
        world.add(Body::new(BodyShape::sphere(0.5), pos, layer))
    }

    #[test]
    fn test_ray_hits_nearest_sphere() {
        let mut world = StaticWorld::new();
        let far = sphere(&mut world, [10.0, 0.0, 0.0], CollisionLayer::PLAYER);
        let near = sphere(&mut world, [5.0, 0.0, 0.0], CollisionLayer::ENEMIES);

        let hit = world
            .cast_ray([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], &RaycastOptions::default())
            .unwrap();
        assert_eq!(hit.body, near);
        assert_relative_eq!(hit.distance, 4.5, epsilon = 1e-5);
        assert_relative_eq!(hit.point[0], 4.5, epsilon = 1e-5);

        let options = RaycastOptions::default().exclude(near);
        assert_eq!(world.cast_ray([0.0; 3], [2.0, 0.0, 0.0], &options).unwrap().body, far);
    }

    #[test]
    fn test_ray_respects_mask_and_range() {
        let mut world = StaticWorld::new();
        sphere(&mut world, [5.0, 0.0, 0.0], CollisionLayer::PICKUPS);
        let target = sphere(&mut world, [20.0, 0.0, 0.0], CollisionLayer::PLAYER);

        let options = RaycastOptions::default().with_mask(LayerMask::sight());
        assert_eq!(world.cast_ray([0.0; 3], [1.0, 0.0, 0.0], &options).unwrap().body, target);

        let short = options.clone().with_max_distance(10.0);
        assert!(world.cast_ray([0.0; 3], [1.0, 0.0, 0.0], &short).is_none());
    }

    #[test]
    fn test_wall_blocks_ray() {
        let mut world = StaticWorld::new();
        let wall = world.add(Body::new(
            BodyShape::cuboid(0.5, 3.0, 3.0),
            [3.0, 0.0, 0.0],
            CollisionLayer::ENVIRONMENT,
        ));
        sphere(&mut world, [6.0, 0.0, 0.0], CollisionLayer::PLAYER);

        let hit = world
            .cast_ray([0.0; 3], [1.0, 0.0, 0.0], &RaycastOptions::default())
            .unwrap();
        assert_eq!(hit.body, wall);
        assert_relative_eq!(hit.distance, 2.5, epsilon = 1e-5);

        // Disabled bodies are ignored
        world.set_enabled(wall, false);
        let hit = world
            .cast_ray([0.0; 3], [1.0, 0.0, 0.0], &RaycastOptions::default())
            .unwrap();
        assert_ne!(hit.body, wall);
    }

    #[test]
    fn test_ray_from_inside_ignores_body() {
        let mut world = StaticWorld::new();
        sphere(&mut world, [0.0; 3], CollisionLayer::ENEMIES);
        assert!(world
            .cast_ray([0.0; 3], [1.0, 0.0, 0.0], &RaycastOptions::default())
            .is_none());
        assert!(world
            .cast_ray([0.0; 3], [0.0; 3], &RaycastOptions::default())
            .is_none());
    }

    #[test]
    fn test_overlap_sphere() {
        let mut world = StaticWorld::new();
        let player = sphere(&mut world, [2.0, 0.0, 0.0], CollisionLayer::PLAYER);
        sphere(&mut world, [2.5, 0.0, 0.0], CollisionLayer::ENEMIES);
        sphere(&mut world, [9.0, 0.0, 0.0], CollisionLayer::PLAYER);

        let mask = LayerMask::from_layers(&[CollisionLayer::PLAYER]);
        assert_eq!(world.overlap_sphere([0.0; 3], 3.0, mask), vec![player]);

        world.set_position(player, [20.0, 0.0, 0.0]);
        assert!(world.overlap_sphere([0.0; 3], 3.0, mask).is_empty());
    }
}
