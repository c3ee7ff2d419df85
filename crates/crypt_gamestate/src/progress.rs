//! Per-level progress: best times, completion and the last run

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Best time a level starts with before any completed run
pub const DEFAULT_FASTEST_TIME: f32 = 180.0;

/// Progress errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    /// No level registered under this id
    #[error("Unknown level: {0}")]
    UnknownLevel(String),
    /// A level with this id is already registered
    #[error("Level already registered: {0}")]
    DuplicateLevel(String),
    /// A run ended while no level was being played
    #[error("No level in progress")]
    NoLevelInProgress,
}

/// Progress result type
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Outcome of one level run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Every objective was complete at the finish
    pub all_complete: bool,
    /// Objective results in declaration order
    pub objective_results: Vec<bool>,
    /// Seconds since the level started
    pub elapsed_time: f32,
}

/// What a recorded run changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    /// The level was completed for the first time
    pub first_completion: bool,
    /// The run beat the previous fastest time
    pub new_best: bool,
}

/// A level and its progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Level identifier (also its scene name)
    pub id: String,
    /// Display name
    pub name: String,
    /// Description shown in level select
    pub description: String,
    /// One description per objective, in declaration order
    pub objective_descriptions: Vec<String>,
    /// Fastest completed run in seconds
    pub fastest_time: f32,
    /// Completed at least once
    pub completed: bool,
    /// Last run, waiting to be shown on the results screen
    #[serde(skip)]
    previous_run: Option<RunResult>,
}

impl LevelRecord {
    /// Create a new level record
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            objective_descriptions: Vec::new(),
            fastest_time: DEFAULT_FASTEST_TIME,
            completed: false,
            previous_run: None,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an objective description
    pub fn with_objective(mut self, description: impl Into<String>) -> Self {
        self.objective_descriptions.push(description.into());
        self
    }

    /// Set the starting fastest time
    pub fn with_fastest_time(mut self, seconds: f32) -> Self {
        self.fastest_time = seconds;
        self
    }

    /// Snapshot of the last run, if not consumed yet
    pub fn previous_run(&self) -> Option<&RunResult> {
        self.previous_run.as_ref()
    }
}

/// The persisted part of a level record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedLevel {
    pub level_id: String,
    pub fastest_time: f32,
    pub completed: bool,
}

/// Level list with progress, in registration order
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    levels: Vec<LevelRecord>,
}

impl ProgressStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a level
    pub fn register(&mut self, record: LevelRecord) -> Result<()> {
        if self.level(&record.id).is_some() {
            return Err(ProgressError::DuplicateLevel(record.id));
        }
        log::debug!("Registered level '{}'", record.id);
        self.levels.push(record);
        Ok(())
    }

    pub fn level(&self, id: &str) -> Option<&LevelRecord> {
        self.levels.iter().find(|l| l.id == id)
    }

    fn level_mut(&mut self, id: &str) -> Result<&mut LevelRecord> {
        self.levels
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| ProgressError::UnknownLevel(id.to_string()))
    }

    pub fn levels(&self) -> &[LevelRecord] {
        &self.levels
    }

    pub fn contains(&self, id: &str) -> bool {
        self.level(id).is_some()
    }

    /// Record a finished run. The snapshot is always replaced; completion
    /// is sticky and the fastest time only moves down on completed runs.
    pub fn record_run(&mut self, id: &str, result: RunResult) -> Result<RecordOutcome> {
        let level = self.level_mut(id)?;
        let mut outcome = RecordOutcome::default();

        if result.all_complete {
            outcome.first_completion = !level.completed;
            level.completed = true;

            if result.elapsed_time < level.fastest_time {
                log::info!(
                    "New best on '{}': {:.2}s (was {:.2}s)",
                    level.id,
                    result.elapsed_time,
                    level.fastest_time
                );
                level.fastest_time = result.elapsed_time;
                outcome.new_best = true;
            }
        }

        log::debug!(
            "Run recorded on '{}': complete={} objectives={:?} time={:.2}s",
            level.id,
            result.all_complete,
            result.objective_results,
            result.elapsed_time
        );
        level.previous_run = Some(result);
        Ok(outcome)
    }

    /// Take the last-run snapshot. A second call returns `None`.
    pub fn consume_and_reset_previous_run(&mut self, id: &str) -> Result<Option<RunResult>> {
        Ok(self.level_mut(id)?.previous_run.take())
    }

    /// Fastest time of every level, in registration order
    pub fn level_times(&self) -> Vec<(String, f32)> {
        self.levels
            .iter()
            .map(|l| (l.id.clone(), l.fastest_time))
            .collect()
    }

    /// Records to write to disk
    pub fn persisted(&self) -> Vec<PersistedLevel> {
        self.levels
            .iter()
            .map(|l| PersistedLevel {
                level_id: l.id.clone(),
                fastest_time: l.fastest_time,
                completed: l.completed,
            })
            .collect()
    }

    /// Merge saved progress into registered levels. Completion is only ever
    /// set and a saved time only replaces a slower one, so a stale save
    /// cannot undo progress. Unknown ids and records with a time that is not
    /// a positive number are skipped. Returns the number of levels merged.
    pub fn restore(&mut self, saved: &[PersistedLevel]) -> usize {
        let mut restored = 0;
        for record in saved {
            if !(record.fastest_time.is_finite() && record.fastest_time > 0.0) {
                log::warn!(
                    "Saved progress for '{}' rejected: fastest_time {}",
                    record.level_id,
                    record.fastest_time
                );
                continue;
            }
            let Ok(level) = self.level_mut(&record.level_id) else {
                log::warn!("Saved progress for unknown level '{}'", record.level_id);
                continue;
            };

            level.completed |= record.completed;
            if record.fastest_time < level.fastest_time {
                level.fastest_time = record.fastest_time;
            }
            restored += 1;
        }
        restored
    }
}

/// Format seconds as `mm:ss`
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
