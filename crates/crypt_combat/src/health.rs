//! Health pool

use serde::{Deserialize, Serialize};

/// Result of applying damage to a health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthChange {
    /// Health was reduced and is still above zero
    Reduced { remaining: u32 },
    /// The damage was at least the current health; health is now zero
    Depleted,
}

/// Integer health, `0 <= current <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Create a full health pool
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Current health
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Maximum health
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Check if health reached zero
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Health as a fraction of max (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Apply damage. An amount of at least the current health depletes the pool.
    pub fn apply(&mut self, amount: u32) -> HealthChange {
        if amount >= self.current {
            self.current = 0;
            HealthChange::Depleted
        } else {
            self.current -= amount;
            HealthChange::Reduced {
                remaining: self.current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);

        assert_eq!(health.apply(30), HealthChange::Reduced { remaining: 70 });
        assert!((health.fraction() - 0.7).abs() < 1e-6);

        assert_eq!(health.apply(70), HealthChange::Depleted);
        assert_eq!(health.current(), 0);
        assert!(health.is_depleted());
    }

    #[test]
    fn test_overkill_floors_at_zero() {
        let mut health = Health::new(1);
        assert_eq!(health.apply(5), HealthChange::Depleted);
        assert_eq!(health.current(), 0);
        assert_eq!(health.max(), 1);
    }
}
