//! Collision layers and layer masks

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A collision layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Default layer
    pub const DEFAULT: Self = Self(0);
    /// Player layer
    pub const PLAYER: Self = Self(1);
    /// Enemy layer
    pub const ENEMIES: Self = Self(2);
    /// Trigger/sensor layer
    pub const TRIGGERS: Self = Self(4);
    /// Static environment layer (walls, doors)
    pub const ENVIRONMENT: Self = Self(5);
    /// Pickup/item layer
    pub const PICKUPS: Self = Self(6);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a bitmask. Layers past the 32 mask bits map to an
    /// empty mask and never match anything.
    pub const fn as_mask(&self) -> u32 {
        match 1u32.checked_shl(self.0) {
            Some(mask) => mask,
            None => 0,
        }
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of layers a query participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer
    pub const ALL: Self = Self(u32::MAX);
    /// No layer
    pub const NONE: Self = Self(0);

    /// Build a mask from a list of layers
    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0u32, |acc, l| acc | l.as_mask()))
    }

    /// Line-of-sight layers: environment, player and enemies
    pub fn sight() -> Self {
        Self::from_layers(&[
            CollisionLayer::ENVIRONMENT,
            CollisionLayer::PLAYER,
            CollisionLayer::ENEMIES,
        ])
    }

    /// Check if a layer is part of the mask
    pub const fn contains(&self, layer: CollisionLayer) -> bool {
        self.0 & layer.as_mask() != 0
    }

    /// Add a layer
    pub fn with(mut self, layer: CollisionLayer) -> Self {
        self.0 |= layer.as_mask();
        self
    }

    /// Remove a layer
    pub fn without(mut self, layer: CollisionLayer) -> Self {
        self.0 &= !layer.as_mask();
        self
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::sight()
    }
}

/// A layer name that is not registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown collision layer: {0}")]
pub struct UnknownLayer(pub String);

/// Named layers, used to resolve layer names from configuration
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layer_names: HashMap<String, CollisionLayer>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register_layer("default", CollisionLayer::DEFAULT);
        registry.register_layer("player", CollisionLayer::PLAYER);
        registry.register_layer("enemies", CollisionLayer::ENEMIES);
        registry.register_layer("triggers", CollisionLayer::TRIGGERS);
        registry.register_layer("environment", CollisionLayer::ENVIRONMENT);
        registry.register_layer("pickups", CollisionLayer::PICKUPS);
        registry
    }
}

impl LayerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            layer_names: HashMap::new(),
        }
    }

    /// Register a named layer
    pub fn register_layer(&mut self, name: &str, layer: CollisionLayer) {
        self.layer_names.insert(name.to_ascii_lowercase(), layer);
    }

    /// Get a layer by name (case-insensitive)
    pub fn get_layer(&self, name: &str) -> Option<CollisionLayer> {
        self.layer_names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Resolve a list of layer names into a mask
    pub fn mask_from_names<S: AsRef<str>>(&self, names: &[S]) -> Result<LayerMask, UnknownLayer> {
        names.iter().try_fold(LayerMask::NONE, |mask, name| {
            let name = name.as_ref();
            self.get_layer(name)
                .map(|layer| mask.with(layer))
                .ok_or_else(|| UnknownLayer(name.to_string()))
        })
    }
}
