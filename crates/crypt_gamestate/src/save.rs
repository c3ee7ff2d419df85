//! Progress persistence

use crate::progress::{PersistedLevel, ProgressStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Save system errors
#[derive(Debug, Error)]
pub enum SaveError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// Written by a newer build
    #[error("Version mismatch: save version {0}, current version {1}")]
    VersionMismatch(u32, u32),
    /// Slot not found
    #[error("Save slot not found: {0}")]
    SlotNotFound(String),
}

/// Save file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveFormat {
    /// JSON (human readable)
    Json,
    /// Binary (compact)
    #[default]
    Binary,
}

impl SaveFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "sav",
        }
    }
}

/// Saved progress for every level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSave {
    /// Save format version
    pub version: u32,
    /// Unix timestamp of the save
    pub timestamp: u64,
    pub levels: Vec<PersistedLevel>,
}

impl ProgressSave {
    /// Snapshot the persisted part of a store
    pub fn capture(store: &ProgressStore, version: u32) -> Self {
        Self {
            version,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            levels: store.persisted(),
        }
    }
}

/// Writes and reads progress slots in a directory
#[derive(Debug, Clone)]
pub struct ProgressSaver {
    save_dir: PathBuf,
    format: SaveFormat,
    version: u32,
}

impl ProgressSaver {
    /// Create a new saver
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            format: SaveFormat::Binary,
            version: 1,
        }
    }

    /// Set save format
    pub fn with_format(mut self, format: SaveFormat) -> Self {
        self.format = format;
        self
    }

    /// Set version
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.save_dir
            .join(format!("{}.{}", slot, self.format.extension()))
    }

    /// Write the store's progress to a slot
    pub fn save(&self, slot: &str, store: &ProgressStore) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.save_dir)?;

        let data = ProgressSave::capture(store, self.version);
        let bytes = match self.format {
            SaveFormat::Json => serde_json::to_vec_pretty(&data)
                .map_err(|e| SaveError::Serialization(e.to_string()))?,
            SaveFormat::Binary => {
                bincode::serialize(&data).map_err(|e| SaveError::Serialization(e.to_string()))?
            }
        };

        let path = self.slot_path(slot);
        fs::write(&path, bytes)?;
        log::debug!("Progress saved to {}", path.display());
        Ok(path)
    }

    /// Read a slot
    pub fn load(&self, slot: &str) -> Result<ProgressSave, SaveError> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot.to_string()));
        }

        let bytes = fs::read(&path)?;
        let data: ProgressSave = match self.format {
            SaveFormat::Json => serde_json::from_slice(&bytes)
                .map_err(|e| SaveError::Deserialization(e.to_string()))?,
            SaveFormat::Binary => bincode::deserialize(&bytes)
                .map_err(|e| SaveError::Deserialization(e.to_string()))?,
        };

        if data.version > self.version {
            return Err(SaveError::VersionMismatch(data.version, self.version));
        }
        Ok(data)
    }

    /// Read a slot and apply it to a store. Returns the number of levels restored.
    pub fn restore(&self, slot: &str, store: &mut ProgressStore) -> Result<usize, SaveError> {
        let data = self.load(slot)?;
        let restored = store.restore(&data.levels);
        log::info!("Restored progress for {} levels from '{}'", restored, slot);
        Ok(restored)
    }

    /// Delete a slot
    pub fn delete(&self, slot: &str) -> Result<(), SaveError> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Check if slot exists
    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{LevelRecord, RunResult};

    fn test_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crypt_save_{}_{}", name, std::process::id()))
    }

    fn store_with_best(seconds: f32) -> ProgressStore {
        let mut store = ProgressStore::new();
        store.register(LevelRecord::new("crypt_1", "The Ossuary")).unwrap();
        store.register(LevelRecord::new("crypt_2", "Catacombs")).unwrap();
        store
            .record_run(
                "crypt_1",
                RunResult {
                    all_complete: true,
                    objective_results: vec![true],
                    elapsed_time: seconds,
                },
            )
            .unwrap();
        store
    }

    fn fresh_store() -> ProgressStore {
        let mut store = ProgressStore::new();
        store.register(LevelRecord::new("crypt_1", "The Ossuary")).unwrap();
        store.register(LevelRecord::new("crypt_2", "Catacombs")).unwrap();
        store
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = test_dir("json");
        let saver = ProgressSaver::new(&dir).with_format(SaveFormat::Json);

        let path = saver.save("progress", &store_with_best(88.0)).unwrap();
        assert!(path.ends_with("progress.json"));
        assert!(saver.exists("progress"));

        let mut store = fresh_store();
        assert_eq!(saver.restore("progress", &mut store).unwrap(), 2);
        let level = store.level("crypt_1").unwrap();
        assert_eq!(level.fastest_time, 88.0);
        assert!(level.completed);
        assert!(level.previous_run().is_none());
        assert!(!store.level("crypt_2").unwrap().completed);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_binary_roundtrip() {
        let dir = test_dir("binary");
        let saver = ProgressSaver::new(&dir);

        saver.save("progress", &store_with_best(42.5)).unwrap();
        let data = saver.load("progress").unwrap();
        assert_eq!(data.version, 1);
        assert_eq!(data.levels[0].fastest_time, 42.5);

        saver.delete("progress").unwrap();
        assert!(!saver.exists("progress"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_slot() {
        let saver = ProgressSaver::new(test_dir("missing"));
        assert!(matches!(
            saver.load("nothing"),
            Err(SaveError::SlotNotFound(slot)) if slot == "nothing"
        ));
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = test_dir("version");
        ProgressSaver::new(&dir)
            .with_version(3)
            .save("progress", &fresh_store())
            .unwrap();

        let result = ProgressSaver::new(&dir).with_version(2).load("progress");
        assert!(matches!(result, Err(SaveError::VersionMismatch(3, 2))));

        let _ = fs::remove_dir_all(&dir);
    }
}
