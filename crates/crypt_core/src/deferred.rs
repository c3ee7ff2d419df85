//! Deferred actions
//!
//! Short delays (a damage flash, a pickup animation, an invulnerability
//! window) are modelled as actions scheduled against the game clock instead of
//! real concurrency. Every task carries a [`Guard`] captured at schedule time.
//! The owner holds the matching [`Lifeline`]; renewing or severing the
//! lifeline invalidates every guard issued before, so a task whose owner was
//! re-triggered or deactivated is dropped instead of delivered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Epoch value of a severed lifeline
const SEVERED: u64 = u64::MAX;

/// Owner side of a liveness check
#[derive(Debug, Clone, Default)]
pub struct Lifeline {
    epoch: Arc<AtomicU64>,
}

impl Lifeline {
    /// Create a new, live lifeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a guard bound to the current epoch
    pub fn guard(&self) -> Guard {
        Guard {
            epoch: self.epoch.clone(),
            issued: self.epoch.load(Ordering::Acquire),
        }
    }

    /// Invalidate every guard issued so far; the lifeline stays usable
    pub fn renew(&self) {
        let _ = self
            .epoch
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |epoch| {
                (epoch != SEVERED).then(|| epoch + 1)
            });
    }

    /// Permanently invalidate this lifeline and all of its guards
    pub fn sever(&self) {
        self.epoch.store(SEVERED, Ordering::Release);
    }

    /// Check whether the lifeline was severed
    pub fn is_severed(&self) -> bool {
        self.epoch.load(Ordering::Acquire) == SEVERED
    }
}

/// Task side of a liveness check
#[derive(Debug, Clone)]
pub struct Guard {
    epoch: Arc<AtomicU64>,
    issued: u64,
}

impl Guard {
    /// A guard that is always valid (for actions without an owner)
    pub fn detached() -> Self {
        Lifeline::new().guard()
    }

    /// Check whether the owner is still the one that scheduled the task
    pub fn is_valid(&self) -> bool {
        let current = self.epoch.load(Ordering::Acquire);
        current != SEVERED && current == self.issued
    }
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

struct Pending<A> {
    id: TaskId,
    due: f64,
    guard: Guard,
    action: A,
}

/// Tick-driven scheduler of deferred actions
///
/// Actions are plain data (usually a small enum); the owner of the scheduler
/// dispatches whatever [`Scheduler::advance`] returns.
pub struct Scheduler<A> {
    /// Current scheduler time in seconds
    now: f64,
    /// Next task id
    next_id: u64,
    /// Pending tasks (unordered)
    tasks: Vec<Pending<A>>,
}

impl<A> Scheduler<A> {
    /// Create an empty scheduler at time zero
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 1,
            tasks: Vec::new(),
        }
    }

    /// Current scheduler time
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `action` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, guard: Guard, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Pending {
            id,
            due: self.now + delay.max(0.0) as f64,
            guard,
            action,
        });
        id
    }

    /// Cancel a pending task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Advance time and collect due actions whose guard is still valid.
    ///
    /// Actions are returned in due-time order; ties keep scheduling order.
    pub fn advance(&mut self, delta_time: f32) -> Vec<A> {
        self.now += delta_time.max(0.0) as f64;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.due <= now);
        self.tasks = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter()
            .filter(|task| task.guard.is_valid())
            .map(|task| task.action)
            .collect()
    }

    /// Number of pending tasks (including ones whose guard has lapsed)
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Cue {
        Flash(u32),
        Pickup(u32),
    }

    #[test]
    fn test_actions_fire_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.5, Guard::detached(), Cue::Flash(1));
        scheduler.schedule(0.1, Guard::detached(), Cue::Pickup(2));

        assert!(scheduler.advance(0.05).is_empty());
        assert_eq!(scheduler.advance(0.1), vec![Cue::Pickup(2)]);
        assert_eq!(scheduler.advance(1.0), vec![Cue::Flash(1)]);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_due_order_is_stable() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0.2, Guard::detached(), Cue::Flash(1));
        scheduler.schedule(0.1, Guard::detached(), Cue::Flash(2));
        scheduler.schedule(0.1, Guard::detached(), Cue::Flash(3));

        assert_eq!(
            scheduler.advance(1.0),
            vec![Cue::Flash(2), Cue::Flash(3), Cue::Flash(1)]
        );
    }

    #[test]
    fn test_renewed_lifeline_drops_stale_tasks() {
        let mut scheduler = Scheduler::new();
        let lifeline = Lifeline::new();

        scheduler.schedule(0.5, lifeline.guard(), Cue::Flash(1));
        lifeline.renew();
        scheduler.schedule(0.5, lifeline.guard(), Cue::Flash(2));

        assert_eq!(scheduler.advance(0.5), vec![Cue::Flash(2)]);
    }

    #[test]
    fn test_severed_lifeline_drops_everything() {
        let mut scheduler = Scheduler::new();
        let lifeline = Lifeline::new();

        scheduler.schedule(0.1, lifeline.guard(), Cue::Pickup(7));
        lifeline.sever();
        lifeline.renew(); // no resurrection

        assert!(lifeline.is_severed());
        assert!(!lifeline.guard().is_valid());
        assert!(scheduler.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let task = scheduler.schedule(0.1, Guard::detached(), Cue::Flash(1));

        assert!(scheduler.cancel(task));
        assert!(!scheduler.cancel(task));
        assert!(scheduler.advance(1.0).is_empty());
    }
}
