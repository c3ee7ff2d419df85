//! Level runs
//!
//! A [`LevelRun`] owns the objectives of the level being played. At the
//! finish it polls them in declaration order, hands the result to the
//! session and asks for the menu scene. Only the first finish counts.

use crate::objective::Objective;
use crate::progress::{RecordOutcome, RunResult};
use crate::state::{GameSession, SceneTransition};
use crypt_event::EventBus;
use std::sync::Arc;

/// Elapsed-time collaborator
pub trait RunClock {
    /// Seconds since the level started
    fn elapsed(&self) -> f32;
}

/// Frame-accumulated level timer
#[derive(Debug, Clone, Default)]
pub struct LevelTimer {
    elapsed: f32,
    stopped: bool,
}

impl LevelTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's delta time
    pub fn tick(&mut self, delta_time: f32) {
        if !self.stopped {
            self.elapsed += delta_time;
        }
    }

    /// Freeze the timer
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl RunClock for LevelTimer {
    fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// The objectives of one level attempt
pub struct LevelRun {
    level_id: String,
    objectives: Vec<Box<dyn Objective>>,
    bus: Arc<EventBus>,
    active: bool,
    finished: bool,
}

impl LevelRun {
    /// Create a new run; objectives are added in declaration order
    pub fn new(level_id: impl Into<String>, bus: Arc<EventBus>) -> Self {
        Self {
            level_id: level_id.into(),
            objectives: Vec::new(),
            bus,
            active: false,
            finished: false,
        }
    }

    /// Add an objective
    pub fn with_objective(mut self, objective: impl Objective + 'static) -> Self {
        self.push(Box::new(objective));
        self
    }

    /// Add a boxed objective. Activated right away if the run is live.
    pub fn push(&mut self, mut objective: Box<dyn Objective>) {
        if self.active {
            objective.activate(&self.bus);
        }
        self.objectives.push(objective);
    }

    pub fn level_id(&self) -> &str {
        &self.level_id
    }

    pub fn objectives(&self) -> &[Box<dyn Objective>] {
        &self.objectives
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Subscribe every objective to the bus
    pub fn start(&mut self) {
        if self.active || self.finished {
            return;
        }
        log::debug!(
            "Starting run on '{}' with {} objectives",
            self.level_id,
            self.objectives.len()
        );
        for objective in &mut self.objectives {
            objective.activate(&self.bus);
        }
        self.active = true;
    }

    /// Objective results in declaration order
    pub fn check_objectives(&self) -> Vec<bool> {
        self.objectives.iter().map(|o| o.check_complete()).collect()
    }

    /// Poll the objectives and read the clock
    pub fn evaluate(&self, clock: &dyn RunClock) -> RunResult {
        let objective_results = self.check_objectives();
        RunResult {
            all_complete: objective_results.iter().all(|&done| done),
            objective_results,
            elapsed_time: clock.elapsed(),
        }
    }

    /// End the run: record the result on the session and request the menu
    /// scene. Returns `None` if the run already ended.
    pub fn trigger_finish(
        &mut self,
        clock: &dyn RunClock,
        session: &mut GameSession,
        scenes: &mut dyn SceneTransition,
    ) -> Option<(RunResult, RecordOutcome)> {
        if self.finished {
            log::trace!("Finish on '{}' ignored: run already ended", self.level_id);
            return None;
        }
        self.finished = true;

        let result = self.evaluate(clock);
        self.stop();

        log::info!(
            "Level '{}' finished: complete={} in {:.2}s",
            self.level_id,
            result.all_complete,
            result.elapsed_time
        );

        let outcome = match session.end_level(result.clone(), scenes) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Run on '{}' not recorded: {}", self.level_id, e);
                RecordOutcome::default()
            }
        };
        Some((result, outcome))
    }

    /// Unsubscribe every objective
    pub fn stop(&mut self) {
        for objective in &mut self.objectives {
            objective.deactivate();
        }
        self.active = false;
    }
}
