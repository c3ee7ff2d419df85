//! Navigation collaborator

use crypt_core::math::Vec3;
use crypt_core::EntityId;

/// Moves agents around the level. Path quality is the implementor's concern.
pub trait Navigator {
    /// Head toward `destination`
    fn set_destination(&mut self, agent: EntityId, destination: Vec3);
    /// Change movement speed (zero stands the agent still)
    fn set_speed(&mut self, agent: EntityId, speed: f32);
    /// Stop moving and forget the destination
    fn halt(&mut self, agent: EntityId);
}

/// A navigation request, as recorded by [`RecordingNavigator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavRequest {
    Destination(EntityId, Vec3),
    Speed(EntityId, f32),
    Halt(EntityId),
}

/// Navigator that only records requests
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub requests: Vec<NavRequest>,
}

impl RecordingNavigator {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent speed set for an agent
    pub fn last_speed(&self, agent: EntityId) -> Option<f32> {
        self.requests.iter().rev().find_map(|req| match req {
            NavRequest::Speed(id, speed) if *id == agent => Some(*speed),
            _ => None,
        })
    }

    /// Most recent destination set for an agent
    pub fn last_destination(&self, agent: EntityId) -> Option<Vec3> {
        self.requests.iter().rev().find_map(|req| match req {
            NavRequest::Destination(id, dest) if *id == agent => Some(*dest),
            _ => None,
        })
    }

    /// Check if the agent was halted
    pub fn was_halted(&self, agent: EntityId) -> bool {
        self.requests.contains(&NavRequest::Halt(agent))
    }
}

impl Navigator for RecordingNavigator {
    fn set_destination(&mut self, agent: EntityId, destination: Vec3) {
        self.requests.push(NavRequest::Destination(agent, destination));
    }

    fn set_speed(&mut self, agent: EntityId, speed: f32) {
        self.requests.push(NavRequest::Speed(agent, speed));
    }

    fn halt(&mut self, agent: EntityId) {
        self.requests.push(NavRequest::Halt(agent));
    }
}
