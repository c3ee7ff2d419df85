//! Straight-line movement standing in for navigation-mesh pathing

use crypt_combat::Navigator;
use crypt_core::math::{self, Vec3};
use crypt_core::EntityId;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Agent {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
}

/// Moves agents straight toward their destinations, ignoring geometry
#[derive(Debug, Clone)]
pub struct StraightMover {
    agents: BTreeMap<EntityId, Agent>,
    stopping_distance: f32,
}

impl Default for StraightMover {
    fn default() -> Self {
        Self {
            agents: BTreeMap::new(),
            stopping_distance: 1.0,
        }
    }
}

impl StraightMover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance from the destination at which agents stop
    pub fn with_stopping_distance(mut self, distance: f32) -> Self {
        self.stopping_distance = distance.max(0.0);
        self
    }

    /// Add an agent at rest
    pub fn register(&mut self, agent: EntityId, position: Vec3, speed: f32) {
        self.agents.insert(
            agent,
            Agent {
                position,
                destination: None,
                speed,
            },
        );
    }

    pub fn remove(&mut self, agent: EntityId) {
        self.agents.remove(&agent);
    }

    pub fn position(&self, agent: EntityId) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.position)
    }

    pub fn destination(&self, agent: EntityId) -> Option<Vec3> {
        self.agents.get(&agent).and_then(|a| a.destination)
    }

    pub fn speed(&self, agent: EntityId) -> Option<f32> {
        self.agents.get(&agent).map(|a| a.speed)
    }

    /// Move every agent for one frame
    pub fn step(&mut self, delta_time: f32) {
        for agent in self.agents.values_mut() {
            let Some(destination) = agent.destination else {
                continue;
            };
            let remaining = math::distance(agent.position, destination) - self.stopping_distance;
            if remaining <= 0.0 || agent.speed <= 0.0 {
                continue;
            }
            let step = (agent.speed * delta_time).min(remaining);
            agent.position = math::move_towards(agent.position, destination, step);
        }
    }
}

impl Navigator for StraightMover {
    fn set_destination(&mut self, agent: EntityId, destination: Vec3) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.destination = Some(destination);
        }
    }

    fn set_speed(&mut self, agent: EntityId, speed: f32) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.speed = speed.max(0.0);
        }
    }

    fn halt(&mut self, agent: EntityId) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.destination = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GHOUL: EntityId = EntityId::from_index(1);

    #[test]
    fn test_moves_toward_destination() {
        let mut mover = StraightMover::new();
        mover.register(GHOUL, [0.0; 3], 2.0);
        mover.set_destination(GHOUL, [0.0, 0.0, 10.0]);

        mover.step(1.0);
        assert_relative_eq!(mover.position(GHOUL).unwrap()[2], 2.0);

        // Stops short of the destination
        mover.step(10.0);
        assert_relative_eq!(mover.position(GHOUL).unwrap()[2], 9.0);
    }

    #[test]
    fn test_speed_and_halt() {
        let mut mover = StraightMover::new().with_stopping_distance(0.0);
        mover.register(GHOUL, [0.0; 3], 2.0);
        mover.set_destination(GHOUL, [4.0, 0.0, 0.0]);

        mover.set_speed(GHOUL, 0.0);
        mover.step(1.0);
        assert_eq!(mover.position(GHOUL), Some([0.0; 3]));

        mover.set_speed(GHOUL, 1.0);
        mover.step(1.0);
        assert_relative_eq!(mover.position(GHOUL).unwrap()[0], 1.0);

        mover.halt(GHOUL);
        mover.step(1.0);
        assert_relative_eq!(mover.position(GHOUL).unwrap()[0], 1.0);
        assert_eq!(mover.destination(GHOUL), None);
    }

    #[test]
    fn test_unknown_agent_ignored() {
        let mut mover = StraightMover::new();
        mover.set_destination(GHOUL, [1.0; 3]);
        mover.halt(GHOUL);
        assert_eq!(mover.position(GHOUL), None);
    }
}
