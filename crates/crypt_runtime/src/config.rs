//! Game configuration
//!
//! Loaded from a TOML file. Every section has defaults, so an empty file (or
//! no file at all) gives a playable setup.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. First command-line argument: `crypt path/to/game.toml`
//! 2. Environment variable: `CRYPT_CONFIG=path/to/game.toml`
//! 3. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! save_dir = "saves"
//!
//! [perception]
//! range = 100.0
//! layers = ["environment", "player", "enemies"]
//!
//! [player]
//! max_health = 100
//! invulnerability = 1.0
//!
//! [player.gun]
//! fire_rate = 5.0
//! magazine_size = 13
//!
//! [enemy]
//! max_health = 1
//! attack_radius = 3.0
//!
//! [pickup]
//! delay = 3.0
//!
//! [[levels]]
//! id = "crypt_1"
//! name = "The Ossuary"
//! objectives = ["Kill every ghoul", "Find the treasure"]
//! ```

use crypt_combat::{EnemyConfig, PlayerConfig};
use crypt_gamestate::{LevelRecord, ProgressError, ProgressStore, DEFAULT_FASTEST_TIME};
use crypt_perception::{LayerRegistry, PerceptionConfig, UnknownLayer};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "CRYPT_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Layer name not known
    #[error(transparent)]
    Layer(#[from] UnknownLayer),
    /// Level list is inconsistent
    #[error(transparent)]
    Level(#[from] ProgressError),
    /// Value out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Config result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Sight settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionSection {
    pub range: f32,
    /// Layer names taking part in sight rays
    pub layers: Vec<String>,
}

impl Default for PerceptionSection {
    fn default() -> Self {
        Self {
            range: 100.0,
            layers: vec!["environment".into(), "player".into(), "enemies".into()],
        }
    }
}

/// Collectible settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupSection {
    /// Seconds between touching a collectible and collecting it
    pub delay: f32,
    /// Pickup distance
    pub radius: f32,
}

impl Default for PickupSection {
    fn default() -> Self {
        Self {
            delay: 3.0,
            radius: 1.0,
        }
    }
}

/// A level in the level list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Objective descriptions, in declaration order
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default = "default_fastest_time")]
    pub fastest_time: f32,
}

fn default_fastest_time() -> f32 {
    DEFAULT_FASTEST_TIME
}

impl LevelEntry {
    fn to_record(&self) -> LevelRecord {
        self.objectives.iter().fold(
            LevelRecord::new(&self.id, &self.name)
                .with_description(&self.description)
                .with_fastest_time(self.fastest_time),
            |record, objective| record.with_objective(objective),
        )
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub perception: PerceptionSection,
    pub player: PlayerConfig,
    /// Defaults for every enemy
    pub enemy: EnemyConfig,
    pub pickup: PickupSection,
    pub levels: Vec<LevelEntry>,
    /// Where progress is saved; no saving if unset
    pub save_dir: Option<PathBuf>,
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the path given on the command line or in `CRYPT_CONFIG`,
    /// falling back to defaults when neither is set.
    pub fn load() -> Result<Self> {
        let path = Self::resolve_path(std::env::args().skip(1), std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => {
                let config = Self::load_from_file(&path)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => {
                log::info!("No config given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// First non-flag argument, else the environment value
    pub fn resolve_path(
        args: impl IntoIterator<Item = String>,
        env: Option<String>,
    ) -> Option<PathBuf> {
        args.into_iter()
            .find(|arg| !arg.starts_with("--"))
            .or(env.filter(|value| !value.is_empty()))
            .map(PathBuf::from)
    }

    /// Reject values that cannot produce a playable level
    pub fn validate(&self) -> Result<()> {
        if self.perception.range <= 0.0 {
            return Err(ConfigError::Invalid("perception.range must be positive".into()));
        }
        LayerRegistry::default().mask_from_names(&self.perception.layers)?;

        if self.player.max_health == 0 {
            return Err(ConfigError::Invalid("player.max_health must be at least 1".into()));
        }
        if self.player.invulnerability < 0.0 {
            return Err(ConfigError::Invalid("player.invulnerability must not be negative".into()));
        }
        let gun = &self.player.gun;
        if gun.fire_rate <= 0.0 {
            return Err(ConfigError::Invalid("player.gun.fire_rate must be positive".into()));
        }
        if gun.magazine_size == 0 {
            return Err(ConfigError::Invalid("player.gun.magazine_size must be at least 1".into()));
        }

        if self.enemy.max_health == 0 {
            return Err(ConfigError::Invalid("enemy.max_health must be at least 1".into()));
        }
        if self.enemy.attack_radius <= 0.0 || self.enemy.alert_radius <= 0.0 {
            return Err(ConfigError::Invalid("enemy radii must be positive".into()));
        }
        if self.enemy.attack_radius > self.enemy.alert_radius {
            return Err(ConfigError::Invalid(
                "enemy.attack_radius must not exceed enemy.alert_radius".into(),
            ));
        }

        if self.pickup.delay < 0.0 || self.pickup.radius <= 0.0 {
            return Err(ConfigError::Invalid("pickup delay or radius out of range".into()));
        }

        if let Some(level) = self.levels.iter().find(|l| l.fastest_time <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "level '{}' has a non-positive fastest_time",
                level.id
            )));
        }
        Ok(())
    }

    /// Sight settings with layer names resolved
    pub fn perception_config(&self) -> Result<PerceptionConfig> {
        let mask = LayerRegistry::default().mask_from_names(&self.perception.layers)?;
        Ok(PerceptionConfig::default()
            .with_range(self.perception.range)
            .with_mask(mask))
    }

    /// The level list as a fresh progress store
    pub fn progress_store(&self) -> Result<ProgressStore> {
        let mut store = ProgressStore::new();
        for level in &self.levels {
            store.register(level.to_record())?;
        }
        Ok(store)
    }

    /// Log a short summary
    pub fn log_summary(&self) {
        log::info!(
            "Config: sight {:.0}u {:?}, player {} hp, {} levels",
            self.perception.range,
            self.perception.layers,
            self.player.max_health,
            self.levels.len()
        );
    }
}
