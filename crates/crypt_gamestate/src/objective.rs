//! Level objectives
//!
//! An objective tracks a fixed set of entity or collectible ids. It listens on
//! the event bus only while active and caches its completion: once every
//! member has been reported, the objective stays complete for the rest of the
//! run and drops its own subscription.

use crypt_combat::EntityKilled;
use crypt_core::{EntityId, ItemId};
use crypt_event::{Event, EventBus, SubscriberId};
use crypt_inventory::ItemPickedUp;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Weak};

/// A completion predicate polled when the level ends
pub trait Objective {
    /// Display name
    fn name(&self) -> &str;

    /// Cached completion; monotonic within a run
    fn check_complete(&self) -> bool;

    /// Start listening for the events this objective needs
    fn activate(&mut self, bus: &Arc<EventBus>);

    /// Stop listening. Safe to call repeatedly.
    fn deactivate(&mut self);

    /// Check if currently subscribed
    fn is_active(&self) -> bool;

    /// Members done and total
    fn progress(&self) -> (usize, usize);
}

struct TrackerState<K> {
    remaining: HashSet<K>,
    total: usize,
    complete: bool,
    subscription: Option<SubscriberId>,
}

/// Completion over a fixed membership set, driven by one event type
struct MembershipTracker<K> {
    name: String,
    state: Arc<Mutex<TrackerState<K>>>,
    bus: Weak<EventBus>,
}

impl<K> MembershipTracker<K>
where
    K: Copy + Eq + Hash + Debug + Send + 'static,
{
    fn new(name: String, members: impl IntoIterator<Item = K>) -> Self {
        let remaining: HashSet<K> = members.into_iter().collect();
        let total = remaining.len();
        Self {
            name,
            state: Arc::new(Mutex::new(TrackerState {
                // An empty set is trivially satisfied
                complete: remaining.is_empty(),
                remaining,
                total,
                subscription: None,
            })),
            bus: Weak::new(),
        }
    }

    fn activate<E: Event>(&mut self, bus: &Arc<EventBus>, key: fn(&E) -> K) {
        {
            let state = self.state.lock();
            if state.subscription.is_some() || state.complete {
                return;
            }
        }

        let weak = Arc::downgrade(bus);
        let state = self.state.clone();
        let name = self.name.clone();
        let handler_bus = weak.clone();

        let id = bus.subscribe(move |event: &E| {
            let finished = {
                let mut state = state.lock();
                let member = key(event);
                if state.complete || !state.remaining.remove(&member) {
                    None
                } else {
                    log::debug!(
                        "Objective '{}': {:?} done, {} left",
                        name,
                        member,
                        state.remaining.len()
                    );
                    if state.remaining.is_empty() {
                        state.complete = true;
                        log::info!("Objective '{}' complete", name);
                        state.subscription.take()
                    } else {
                        None
                    }
                }
            };

            if let (Some(id), Some(bus)) = (finished, handler_bus.upgrade()) {
                bus.unsubscribe(id);
            }
        });

        self.state.lock().subscription = Some(id);
        self.bus = weak;
    }

    fn deactivate(&mut self) {
        let subscription = self.state.lock().subscription.take();
        if let (Some(id), Some(bus)) = (subscription, self.bus.upgrade()) {
            bus.unsubscribe(id);
        }
    }

    fn is_complete(&self) -> bool {
        self.state.lock().complete
    }

    fn is_active(&self) -> bool {
        self.state.lock().subscription.is_some()
    }

    fn progress(&self) -> (usize, usize) {
        let state = self.state.lock();
        (state.total - state.remaining.len(), state.total)
    }
}

impl<K> Drop for MembershipTracker<K> {
    fn drop(&mut self) {
        let subscription = self.state.lock().subscription.take();
        if let (Some(id), Some(bus)) = (subscription, self.bus.upgrade()) {
            bus.unsubscribe(id);
        }
    }
}

/// Complete once every target entity has been killed
pub struct KillAllObjective {
    tracker: MembershipTracker<EntityId>,
}

impl KillAllObjective {
    /// Create a new kill-all objective
    pub fn new(name: impl Into<String>, targets: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            tracker: MembershipTracker::new(name.into(), targets),
        }
    }
}

impl Objective for KillAllObjective {
    fn name(&self) -> &str {
        &self.tracker.name
    }

    fn check_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    fn activate(&mut self, bus: &Arc<EventBus>) {
        self.tracker.activate::<EntityKilled>(bus, |event| event.entity);
    }

    fn deactivate(&mut self) {
        self.tracker.deactivate();
    }

    fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    fn progress(&self) -> (usize, usize) {
        self.tracker.progress()
    }
}

/// Complete once every listed collectible has been picked up
pub struct CollectAllObjective {
    tracker: MembershipTracker<ItemId>,
}

impl CollectAllObjective {
    /// Create a new collect-all objective
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            tracker: MembershipTracker::new(name.into(), items),
        }
    }
}

impl Objective for CollectAllObjective {
    fn name(&self) -> &str {
        &self.tracker.name
    }

    fn check_complete(&self) -> bool {
        self.tracker.is_complete()
    }

    fn activate(&mut self, bus: &Arc<EventBus>) {
        self.tracker.activate::<ItemPickedUp>(bus, |event| event.item);
    }

    fn deactivate(&mut self) {
        self.tracker.deactivate();
    }

    fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    fn progress(&self) -> (usize, usize) {
        self.tracker.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypt_inventory::CollectibleKind;

    const A: EntityId = EntityId::from_index(1);
    const B: EntityId = EntityId::from_index(2);
    const PLAYER: EntityId = EntityId::from_index(0);

    fn kill(bus: &EventBus, entity: EntityId) {
        bus.publish(EntityKilled {
            entity,
            killer: Some(PLAYER),
        });
    }

    #[test]
    fn test_kill_all() {
        let bus = EventBus::shared();
        let mut objective = KillAllObjective::new("Slay the guards", [A, B]);
        objective.activate(&bus);
        assert!(objective.is_active());

        kill(&bus, A);
        assert!(!objective.check_complete());
        assert_eq!(objective.progress(), (1, 2));

        kill(&bus, B);
        assert!(objective.check_complete());

        // Completion dropped the subscription from inside the handler
        assert!(!objective.is_active());
        assert_eq!(bus.subscriber_count::<EntityKilled>(), 0);
    }

    #[test]
    fn test_completion_is_sticky() {
        let bus = EventBus::shared();
        let mut objective = KillAllObjective::new("Slay", [A]);
        objective.activate(&bus);

        kill(&bus, A);
        kill(&bus, A);
        kill(&bus, B);
        assert!(objective.check_complete());

        objective.deactivate();
        objective.deactivate();
        assert!(objective.check_complete());
    }

    #[test]
    fn test_unrelated_and_duplicate_events() {
        let bus = EventBus::shared();
        let mut objective = KillAllObjective::new("Slay", [A, B]);
        objective.activate(&bus);

        kill(&bus, PLAYER);
        kill(&bus, A);
        kill(&bus, A);
        assert_eq!(objective.progress(), (1, 2));
        assert!(!objective.check_complete());
    }

    #[test]
    fn test_inactive_objective_misses_events() {
        let bus = EventBus::shared();
        let mut objective = KillAllObjective::new("Slay", [A]);

        kill(&bus, A);
        assert!(!objective.check_complete());

        objective.activate(&bus);
        objective.deactivate();
        kill(&bus, A);
        assert!(!objective.check_complete());
    }

    #[test]
    fn test_collect_all() {
        let bus = EventBus::shared();
        let gold = ItemId::from_index(10);
        let gem = ItemId::from_index(11);
        let mut objective = CollectAllObjective::new("Loot the crypt", [gold, gem]);
        objective.activate(&bus);

        let pick = |item| {
            bus.publish(ItemPickedUp {
                item,
                kind: CollectibleKind::Treasure,
                picker: PLAYER,
            })
        };

        pick(gold);
        assert!(!objective.check_complete());
        pick(gem);
        assert!(objective.check_complete());
    }

    #[test]
    fn test_empty_set_is_complete() {
        let objective = CollectAllObjective::new("Nothing to find", []);
        assert!(objective.check_complete());
        assert_eq!(objective.progress(), (0, 0));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::shared();
        {
            let mut objective = KillAllObjective::new("Slay", [A]);
            objective.activate(&bus);
            assert_eq!(bus.subscriber_count::<EntityKilled>(), 1);
        }
        assert_eq!(bus.subscriber_count::<EntityKilled>(), 0);
        kill(&bus, A);
    }
}
