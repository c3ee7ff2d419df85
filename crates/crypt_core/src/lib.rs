//! # crypt_core - Crypt Run Core
//!
//! Zero-dependency primitives shared by every gameplay crate:
//! - **Identifiers**: stable opaque ids assigned at creation and looked up
//!   through registries, never through live object references
//! - **Deferred actions**: a tick-driven scheduler whose tasks carry a guard
//!   captured at schedule time, so a torn-down owner never sees its callbacks
//! - **Vector math**: the handful of `[f32; 3]` helpers the gameplay code needs

pub mod deferred;
pub mod id;
pub mod math;

pub use deferred::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::deferred::{Guard, Lifeline, Scheduler, TaskId};
    pub use crate::id::{BodyId, EntityId, IdGenerator, ItemId};
    pub use crate::math::Vec3;
}
