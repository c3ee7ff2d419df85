//! Damage information

use crypt_core::math::Vec3;
use crypt_core::EntityId;

/// Information about a damage instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageInfo {
    /// Damage amount
    pub amount: u32,
    /// Entity that caused the damage (if any)
    pub source: Option<EntityId>,
    /// World position where damage was applied
    pub hit_point: Option<Vec3>,
}

impl DamageInfo {
    /// Create new damage info
    pub fn new(amount: u32) -> Self {
        Self {
            amount,
            source: None,
            hit_point: None,
        }
    }

    /// Set the source entity
    pub fn with_source(mut self, entity: EntityId) -> Self {
        self.source = Some(entity);
        self
    }

    /// Set the hit point
    pub fn with_hit_point(mut self, point: Vec3) -> Self {
        self.hit_point = Some(point);
        self
    }
}
