//! Cadence Transport Controls
//!
//! A compact transport strip for timeline-driven content: play/pause,
//! run/stop, a menu toggle and a seek bar with marker ticks, all drawn into
//! a [`DrawContext`](cadence_core::DrawContext) and driven by springs.
//!
//! # Example (Headless)
//!
//! ```rust
//! use cadence_controls::prelude::*;
//!
//! let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, 296.0, 32.0));
//! host.attach();
//!
//! let mut controls = TimelineControls::new(host).with_bus(InputBus::new());
//! controls.connected();
//! controls.add_marker(4.0, MarkerKind::Tick);
//!
//! let mut ctx = RecordingContext::new(Size::new(296.0, 32.0));
//! assert!(controls.frame(&mut ctx, 1.0 / 60.0));
//!
//! assert_eq!(controls.seek_next_marker(), Some(4.0));
//! ```
//!
//! # Architecture
//!
//! - [`PlaybackModel`] - paused/running flags, position, duration, markers
//! - [`ToggleButton`] / [`SeekBar`] - scene nodes editing the model on input
//! - [`SceneGraph`] - ordered nodes, render clock and draw loop
//! - [`HitTestDispatcher`] - widget-local pointer to node-local handlers
//! - [`DragSession`] - document-level input for a press-to-release gesture
//! - [`TimelineControls`] - the widget tying it together on a host element

mod config;
mod control;
mod dispatch;
mod drag;
mod error;
mod node;
mod playback;
mod scene;
mod seek_bar;
mod toggle;
mod widget;

#[cfg(test)]
mod tests;

pub use config::{ControlStyle, ControlsConfig, SpringSettings};
pub use control::ControlNode;
pub use dispatch::{Hit, HitList, HitMode, HitTestDispatcher};
pub use drag::DragSession;
pub use error::{ControlsError, Result};
pub use node::{Node, PointerAction};
pub use playback::{Marker, MarkerKind, Markers, PlaybackClock, PlaybackModel, PlaybackStep};
pub use scene::{NodeId, SceneGraph};
pub use seek_bar::{tick_geometry, SeekBar, TickGeometry};
pub use toggle::{weight_one, weight_zero, ToggleButton, ToggleKind};
pub use widget::{TimelineControls, DISABLED_CLASS, HIDDEN_CLASS};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::{ControlsConfig, SpringSettings};
    pub use crate::error::{ControlsError, Result};
    pub use crate::playback::{Marker, MarkerKind, Markers, PlaybackModel, PlaybackStep};
    pub use crate::widget::TimelineControls;

    // Core types
    pub use cadence_core::{Color, DrawContext, Point, RecordingContext, Rect, Size};

    // Platform types
    pub use cadence_platform::{
        HeadlessHost, HostElement, InputBus, LifecycleEvent, MouseButton, PointerEvent,
    };
}
