//! Cadence Platform Abstraction Layer
//!
//! Platform-agnostic traits and types for the element a widget is mounted
//! in and the pointer input it receives.
//!
//! # Architecture
//!
//! - [`HostElement`] - Layout box, pixel density, canvas sizing and
//!   presentation classes of the element carrying a widget
//! - [`InputBus`] - Process-wide fan-out of document-level pointer events,
//!   consumed through scoped [`InputSubscription`]s
//! - [`HostEvent`] - Element-scoped pointer, lifecycle and frame events
//!
//! A [`HeadlessHost`] is provided for tests and offscreen rendering.

mod bus;
mod error;
mod event;
mod host;
mod input;

// Re-export all public types
pub use bus::{InputBus, InputSubscription, SubscriberId};
pub use error::{PlatformError, Result};
pub use event::{HostEvent, LifecycleEvent};
pub use host::{HeadlessHost, HostElement};
pub use input::{MouseButton, PointerEvent};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bus::{InputBus, InputSubscription};
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{HostEvent, LifecycleEvent};
    pub use crate::host::{HeadlessHost, HostElement};
    pub use crate::input::{MouseButton, PointerEvent};
}
