//! Host lifecycle events

use crate::input::PointerEvent;

/// Events a host element delivers to the widget it carries
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// Element-scoped pointer input
    Pointer(PointerEvent),
    /// Element lifecycle change
    Lifecycle(LifecycleEvent),
    /// Time to render; `dt` is seconds since the previous frame
    Frame { dt: f64 },
}

/// Element lifecycle events
#[derive(Clone, Debug, PartialEq)]
pub enum LifecycleEvent {
    /// Element was inserted into a document
    Attached,
    /// Element was removed from its document
    Detached,
    /// Element's layout box changed size
    Resized {
        /// New width in logical pixels
        width: f32,
        /// New height in logical pixels
        height: f32,
    },
}
