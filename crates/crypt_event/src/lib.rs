//! # crypt_event - Synchronous Event Bus
//!
//! Publish/subscribe channel for domain events:
//! - Synchronous delivery on the publishing thread; every handler has run
//!   when [`EventBus::publish`] returns
//! - Typed events keyed by `TypeId`
//! - Priority-based delivery, subscription order within a priority
//! - Subscribe and unsubscribe are safe from inside a handler
//!
//! The bus never owns subscriber state. It only maps event types to handler
//! closures; whatever the handlers mutate lives with the subscriber.

use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Event priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Low = 0,
    #[default]
    Normal = 1,
    High = 2,
    Critical = 3,
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

// Blanket implementation
impl<T: Send + Sync + 'static> Event for T {}

/// Dynamic event handler
type DynamicHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

struct Subscription {
    id: SubscriberId,
    priority: Priority,
    handler: DynamicHandler,
}

#[derive(Default)]
struct Registry {
    /// Handlers per event type, highest priority first
    handlers: BTreeMap<TypeId, Vec<Subscription>>,
    /// Ids currently subscribed (any event type)
    live: HashSet<SubscriberId>,
}

/// Event bus for publishing and subscribing to events
///
/// All methods take `&self`; the bus is meant to be shared behind an `Arc`
/// and handed to every component that publishes or subscribes.
pub struct EventBus {
    /// Subscriber registry, never locked while a handler runs
    registry: Mutex<Registry>,
    /// Next subscriber ID
    next_subscriber_id: AtomicU64,
    /// Number of events published so far
    published: AtomicU64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            next_subscriber_id: AtomicU64::new(1),
            published: AtomicU64::new(0),
        }
    }

    /// Create a new shared event bus
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Publish an event to every current subscriber of its type.
    ///
    /// Handlers run in priority order, then subscription order. A handler
    /// that unsubscribes (itself or another subscriber) prevents any delivery
    /// to the removed subscriber for the rest of this publish; subscribers
    /// added during the publish first see the next event.
    pub fn publish<E: Event>(&self, event: E) {
        self.published.fetch_add(1, Ordering::Relaxed);

        let snapshot: Vec<(SubscriberId, DynamicHandler)> = {
            let registry = self.registry.lock();
            match registry.handlers.get(&TypeId::of::<E>()) {
                Some(handlers) => handlers
                    .iter()
                    .map(|sub| (sub.id, sub.handler.clone()))
                    .collect(),
                None => return,
            }
        };

        for (id, handler) in snapshot {
            if self.is_subscribed(id) {
                handler(&event);
            }
        }
    }

    /// Subscribe to an event type
    pub fn subscribe<E: Event, F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority::<E, F>(handler, Priority::Normal)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<E: Event, F>(&self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id.fetch_add(1, Ordering::Relaxed));

        let wrapped_handler: DynamicHandler = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        let mut registry = self.registry.lock();
        let handlers = registry.handlers.entry(TypeId::of::<E>()).or_default();
        handlers.push(Subscription {
            id,
            priority,
            handler: wrapped_handler,
        });
        // Stable sort keeps subscription order within a priority
        handlers.sort_by(|a, b| b.priority.cmp(&a.priority));
        registry.live.insert(id);

        log::trace!("Subscriber {:?} added ({:?})", id, priority);
        id
    }

    /// Unsubscribe. Returns false if the id was not subscribed (already
    /// removed, or never issued); that case is a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut registry = self.registry.lock();
        if !registry.live.remove(&id) {
            return false;
        }
        for handlers in registry.handlers.values_mut() {
            handlers.retain(|sub| sub.id != id);
        }
        registry.handlers.retain(|_, handlers| !handlers.is_empty());

        log::trace!("Subscriber {:?} removed", id);
        true
    }

    /// Check whether a subscriber is still registered
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.registry.lock().live.contains(&id)
    }

    /// Number of subscribers for an event type
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.registry
            .lock()
            .handlers
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Total number of events published
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Drop every subscription
    pub fn clear(&self) {
        let mut registry = self.registry.lock();
        registry.handlers.clear();
        registry.live.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, Priority, SubscriberId};
}
