//! Game session: menu, level and end screen

use crate::progress::{
    format_clock, LevelRecord, ProgressError, ProgressStore, RecordOutcome, Result, RunResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scene shown between runs
pub const MAIN_MENU_SCENE: &str = "Main Menu";

/// Top-level game states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    /// Main menu and level select
    #[default]
    Menu,
    /// A level is being played
    Level,
    /// A run just ended; results pending
    EndScreen,
}

/// Scene-loading collaborator
pub trait SceneTransition {
    /// Request that `scene` be loaded
    fn request_scene(&mut self, scene: &str);
}

/// Records requested scenes instead of loading them
#[derive(Debug, Default)]
pub struct SceneLog {
    pub requests: Vec<String>,
}

impl SceneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.requests.last().map(String::as_str)
    }
}

impl SceneTransition for SceneLog {
    fn request_scene(&mut self, scene: &str) {
        log::debug!("Scene requested: {}", scene);
        self.requests.push(scene.to_string());
    }
}

/// Results screen contents for one finished run
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub level_id: String,
    pub level_name: String,
    /// Every objective complete
    pub passed: bool,
    /// Objective description and result, in declaration order
    pub objectives: Vec<(String, bool)>,
    pub run_time: f32,
    pub fastest_time: f32,
}

impl ResultsView {
    fn build(level: &LevelRecord, run: RunResult) -> Self {
        let objectives = run
            .objective_results
            .iter()
            .enumerate()
            .map(|(i, &done)| {
                let description = level
                    .objective_descriptions
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| format!("Objective {}", i + 1));
                (description, done)
            })
            .collect();

        Self {
            level_id: level.id.clone(),
            level_name: level.name.clone(),
            passed: run.all_complete,
            objectives,
            run_time: run.elapsed_time,
            fastest_time: level.fastest_time,
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {}",
            self.level_name,
            if self.passed { "PASSED" } else { "FAILED" }
        )?;
        for (description, done) in &self.objectives {
            writeln!(f, "  [{}] {}", if *done { "x" } else { " " }, description)?;
        }
        write!(
            f,
            "  time {}  best {}",
            format_clock(self.run_time),
            format_clock(self.fastest_time)
        )
    }
}

/// Session context: level list, progress and the current level
#[derive(Debug, Default)]
pub struct GameSession {
    state: GameState,
    store: ProgressStore,
    current_level: Option<String>,
}

impl GameSession {
    /// Create a new session in the menu
    pub fn new(store: ProgressStore) -> Self {
        Self {
            state: GameState::Menu,
            store,
            current_level: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_level(&self) -> Option<&str> {
        self.current_level.as_deref()
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore {
        &mut self.store
    }

    /// Start playing a level
    pub fn play_level(&mut self, id: &str, scenes: &mut dyn SceneTransition) -> Result<()> {
        if !self.store.contains(id) {
            return Err(ProgressError::UnknownLevel(id.to_string()));
        }
        log::info!("Playing level '{}'", id);
        self.state = GameState::Level;
        self.current_level = Some(id.to_string());
        scenes.request_scene(id);
        Ok(())
    }

    /// A run on the current level ended
    pub fn end_level(
        &mut self,
        result: RunResult,
        scenes: &mut dyn SceneTransition,
    ) -> Result<RecordOutcome> {
        let id = self
            .current_level
            .clone()
            .ok_or(ProgressError::NoLevelInProgress)?;

        self.state = GameState::EndScreen;
        scenes.request_scene(MAIN_MENU_SCENE);
        self.store.record_run(&id, result)
    }

    /// Consume the finished run for the results screen and return to the
    /// menu. `None` unless a run just ended.
    pub fn take_results(&mut self) -> Option<ResultsView> {
        if self.state != GameState::EndScreen {
            return None;
        }

        self.state = GameState::Menu;
        let id = self.current_level.take()?;
        let run = match self.store.consume_and_reset_previous_run(&id) {
            Ok(run) => run?,
            Err(e) => {
                log::warn!("Results unavailable: {}", e);
                return None;
            }
        };
        let level = self.store.level(&id)?;
        Some(ResultsView::build(level, run))
    }

    /// Fastest time of every level for the level-select screen
    pub fn level_times(&self) -> Vec<(String, f32)> {
        self.store.level_times()
    }
}
