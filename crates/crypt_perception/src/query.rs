//! Ray queries

use crate::layers::{CollisionLayer, LayerMask};
use crypt_core::math::Vec3;
use crypt_core::BodyId;

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The body that was hit
    pub body: BodyId,
    /// Hit point in world space
    pub point: Vec3,
    /// Distance from ray origin
    pub distance: f32,
    /// Layer of the body that was hit
    pub layer: CollisionLayer,
}

/// Options for raycast queries
#[derive(Debug, Clone)]
pub struct RaycastOptions {
    /// Maximum distance for the ray
    pub max_distance: f32,
    /// Layers the ray can hit
    pub mask: LayerMask,
    /// Bodies to exclude
    pub exclude: Vec<BodyId>,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: f32::MAX,
            mask: LayerMask::ALL,
            exclude: Vec::new(),
        }
    }
}

impl RaycastOptions {
    /// Set maximum distance
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set the layer mask
    pub fn with_mask(mut self, mask: LayerMask) -> Self {
        self.mask = mask;
        self
    }

    /// Add a body to exclude
    pub fn exclude(mut self, body: BodyId) -> Self {
        self.exclude.push(body);
        self
    }
}

/// Anything that can answer "what does this ray hit first"
pub trait RayQuery {
    /// Cast a ray and get the first hit. `direction` need not be normalized.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, options: &RaycastOptions) -> Option<RaycastHit>;
}

impl<T: RayQuery + ?Sized> RayQuery for &T {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, options: &RaycastOptions) -> Option<RaycastHit> {
        (**self).cast_ray(origin, direction, options)
    }
}
