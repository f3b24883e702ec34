//! Global input bus
//!
//! Document-level pointer events (moves and releases that happen anywhere,
//! not just over a widget) are published on a process-wide `InputBus`.
//! Interested parties hold an `InputSubscription`; events queue in the
//! subscription's inbox until drained. Dropping the subscription removes it
//! from the bus.
//!
//! # Example
//!
//! ```rust
//! use cadence_platform::{InputBus, PointerEvent};
//!
//! let bus = InputBus::new();
//! let subscription = bus.subscribe();
//!
//! bus.publish(PointerEvent::Moved { x: 4.0, y: 2.0 });
//! assert_eq!(subscription.drain().len(), 1);
//!
//! drop(subscription);
//! assert_eq!(bus.subscriber_count(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::input::PointerEvent;

new_key_type! {
    /// Handle to a bus subscriber
    pub struct SubscriberId;
}

/// Process-wide bus used by hosts that do not supply their own
static GLOBAL_BUS: OnceLock<InputBus> = OnceLock::new();

#[derive(Default)]
struct BusInner {
    inboxes: SlotMap<SubscriberId, VecDeque<PointerEvent>>,
}

fn lock(inner: &Mutex<BusInner>) -> MutexGuard<'_, BusInner> {
    inner.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("InputBus: recovering from poisoned lock");
        poisoned.into_inner()
    })
}

/// Fan-out queue of document-level pointer events
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct InputBus {
    inner: Arc<Mutex<BusInner>>,
}

impl std::fmt::Debug for InputBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl InputBus {
    /// Create an isolated bus
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide bus
    pub fn global() -> &'static InputBus {
        GLOBAL_BUS.get_or_init(InputBus::new)
    }

    /// Register a new subscriber with an empty inbox
    pub fn subscribe(&self) -> InputSubscription {
        let id = lock(&self.inner).inboxes.insert(VecDeque::new());
        tracing::trace!("InputBus: subscribe {:?}", id);
        InputSubscription {
            bus: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Queue `event` in every subscriber's inbox
    ///
    /// Returns the number of subscribers that received it.
    pub fn publish(&self, event: PointerEvent) -> usize {
        let mut inner = lock(&self.inner);
        for (_, inbox) in inner.inboxes.iter_mut() {
            inbox.push_back(event);
        }
        inner.inboxes.len()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).inboxes.len()
    }
}

/// A live registration on an `InputBus`
///
/// Holds a weak reference so a subscription never keeps the bus alive.
pub struct InputSubscription {
    bus: Weak<Mutex<BusInner>>,
    id: SubscriberId,
}

impl std::fmt::Debug for InputSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl InputSubscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Take every queued event, oldest first
    pub fn drain(&self) -> Vec<PointerEvent> {
        let Some(inner) = self.bus.upgrade() else {
            return Vec::new();
        };
        let mut guard = lock(&inner);
        let events: Vec<PointerEvent> = guard
            .inboxes
            .get_mut(self.id)
            .map(|inbox| inbox.drain(..).collect())
            .unwrap_or_default();
        events
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        let Some(inner) = self.bus.upgrade() else {
            return 0;
        };
        let guard = lock(&inner);
        let pending = guard.inboxes.get(self.id).map_or(0, VecDeque::len);
        pending
    }

    /// Check if the bus is still alive
    pub fn is_active(&self) -> bool {
        self.bus.strong_count() > 0
    }
}

impl Drop for InputSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            lock(&inner).inboxes.remove(self.id);
            tracing::trace!("InputBus: unsubscribe {:?}", self.id);
        }
    }
}
