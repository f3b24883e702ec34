//! Drag sessions
//!
//! A press inside the widget opens a session that listens for
//! document-level moves and releases on the input bus, so a drag keeps
//! working after the pointer leaves the widget. The subscription lives
//! exactly as long as the session: release, cancel, detach and widget drop
//! all end it.

use std::time::Instant;

use cadence_core::Point;
use cadence_platform::{InputBus, InputSubscription, PointerEvent};

/// A press-to-release pointer interaction
#[derive(Debug)]
pub struct DragSession {
    subscription: InputSubscription,
    /// Widget-local position of the press
    origin: Point,
    started: Instant,
}

impl DragSession {
    /// Start listening on `bus`
    pub fn begin(bus: &InputBus, origin: Point) -> Self {
        let subscription = bus.subscribe();
        tracing::debug!(
            "DragSession: begin at ({:.1}, {:.1}) as {:?}",
            origin.x,
            origin.y,
            subscription.id()
        );
        Self {
            subscription,
            origin,
            started: Instant::now(),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Take the queued document-level events, oldest first
    pub fn take_events(&self) -> Vec<PointerEvent> {
        self.subscription.drain()
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.subscription.pending()
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        tracing::debug!(
            "DragSession: end after {:.1}ms",
            self.started.elapsed().as_secs_f64() * 1000.0
        );
    }
}
