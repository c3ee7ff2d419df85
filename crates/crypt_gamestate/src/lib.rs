//! # crypt_gamestate - Objectives, Runs and Progress
//!
//! # Features
//!
//! - `KillAllObjective` and `CollectAllObjective` trackers fed by bus events
//! - Sticky completion with self-unsubscription on completion
//! - `LevelRun` aggregation in objective declaration order
//! - Best times that only improve and a one-shot last-run snapshot
//! - JSON or binary progress saves with a version check
//! - `GameSession` with menu, level and end-screen states
//!
//! # Example
//!
//! ```ignore
//! use crypt_gamestate::prelude::*;
//!
//! let mut session = GameSession::new(store);
//! session.play_level("crypt_1", &mut scenes)?;
//!
//! let mut run = LevelRun::new("crypt_1", bus.clone())
//!     .with_objective(KillAllObjective::new("Slay the ghouls", ghouls))
//!     .with_objective(CollectAllObjective::new("Loot the crypt", treasure));
//! run.start();
//!
//! // ... play ...
//!
//! run.trigger_finish(&timer, &mut session, &mut scenes);
//! let results = session.take_results();
//! ```

pub mod level;
pub mod objective;
pub mod progress;
pub mod save;
pub mod state;

pub mod prelude {
    pub use crate::level::{LevelRun, LevelTimer, RunClock};
    pub use crate::objective::{CollectAllObjective, KillAllObjective, Objective};
    pub use crate::progress::{
        format_clock, LevelRecord, PersistedLevel, ProgressError, ProgressStore, RecordOutcome,
        RunResult, DEFAULT_FASTEST_TIME,
    };
    pub use crate::save::{ProgressSave, ProgressSaver, SaveError, SaveFormat};
    pub use crate::state::{
        GameSession, GameState, ResultsView, SceneLog, SceneTransition, MAIN_MENU_SCENE,
    };
}

pub use prelude::*;
