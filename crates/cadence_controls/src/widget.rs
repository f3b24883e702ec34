//! Timeline controls widget
//!
//! Composes the transport controls into one strip:
//!
//! ```text
//! ┌────┬──────────────────────────────────────┬────┬────┐
//! │ ▶  │ ─────────┃──────│─────────│───────── │ ▲  │ ⋯  │
//! └────┴──────────────────────────────────────┴────┴────┘
//!  play/pause            seek bar              run  menu
//! ```
//!
//! The widget owns the [`PlaybackModel`]. Pointer input edits the model
//! through the nodes; each frame copies the model into the nodes' animated
//! targets before drawing, so the controls always converge on the model and
//! never the other way round.
//!
//! Two clocks are in play. The scene's render clock drives animation and
//! runs while the widget is attached. The [`PlaybackClock`] moves
//! `current_time` and only does so when the host calls
//! [`TimelineControls::advance_playback`].

use std::sync::Arc;

use cadence_core::{DrawContext, Point};
use cadence_platform::{HostElement, HostEvent, InputBus, LifecycleEvent, PointerEvent};

use crate::config::ControlsConfig;
use crate::control::ControlNode;
use crate::dispatch::{HitMode, HitTestDispatcher};
use crate::drag::DragSession;
use crate::error::Result;
use crate::node::{Node, PointerAction};
use crate::playback::{Marker, MarkerKind, Markers, PlaybackClock, PlaybackModel, PlaybackStep};
use crate::scene::{NodeId, SceneGraph};
use crate::seek_bar::SeekBar;
use crate::toggle::{ToggleButton, ToggleKind};

/// Host class hiding the widget
pub const HIDDEN_CLASS: &str = "hidden";

/// Host class disabling pointer input
pub const DISABLED_CLASS: &str = "disabled";

#[derive(Clone, Copy, Debug)]
struct ControlIds {
    play_pause: NodeId,
    run_stop: NodeId,
    menu: NodeId,
    seek_bar: NodeId,
}

/// Transport controls bound to a host element
#[derive(Debug)]
pub struct TimelineControls<H: HostElement> {
    host: H,
    config: ControlsConfig,
    model: PlaybackModel,
    playback_clock: PlaybackClock,
    scene: SceneGraph<ControlNode>,
    dispatcher: HitTestDispatcher,
    bus: InputBus,
    drag: Option<DragSession>,
    ids: ControlIds,
}

impl<H: HostElement> TimelineControls<H> {
    /// Controls with the stock configuration on the process-wide input bus
    pub fn new(host: H) -> Self {
        Self::build(host, ControlsConfig::default(), InputBus::global().clone())
    }

    /// Controls with a validated custom configuration
    pub fn with_config(host: H, config: ControlsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(host, config, InputBus::global().clone()))
    }

    /// Listen for document-level input on `bus` instead of the global one
    ///
    /// Ends any drag in progress.
    pub fn with_bus(mut self, bus: InputBus) -> Self {
        self.drag = None;
        self.bus = bus;
        self
    }

    fn build(host: H, config: ControlsConfig, bus: InputBus) -> Self {
        let style = config.style();
        let size = config.button_size;
        let toggle = |kind| ToggleButton::new(kind, size, config.toggle_spring, style.clone());

        // Insertion order is draw and dispatch order
        let mut scene: SceneGraph<ControlNode> = SceneGraph::new();
        let play_pause = scene.add_child(toggle(ToggleKind::PlayPause).into());
        let run_stop = scene.add_child(toggle(ToggleKind::RunStop).into());
        let menu = scene.add_child(toggle(ToggleKind::Menu).into());
        let seek_bar = scene.add_child(SeekBar::new(size, config.seek_spring, style).into());

        Self {
            host,
            config,
            model: PlaybackModel::new(),
            playback_clock: PlaybackClock::default(),
            scene,
            dispatcher: HitTestDispatcher::new(),
            bus,
            drag: None,
            ids: ControlIds {
                play_pause,
                run_stop,
                menu,
                seek_bar,
            },
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn scene(&self) -> &SceneGraph<ControlNode> {
        &self.scene
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// The host element was inserted into a document
    pub fn connected(&mut self) {
        self.update();
        self.scene.run();
        self.scene.play();
        tracing::info!("TimelineControls: attached");
    }

    /// The host element was removed from its document
    pub fn disconnected(&mut self) {
        self.scene.stop();
        self.drag = None;
        tracing::info!("TimelineControls: detached");
    }

    /// The host element's layout box changed
    pub fn resized(&mut self) {
        self.update();
    }

    pub fn handle_lifecycle(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Attached => self.connected(),
            LifecycleEvent::Detached => self.disconnected(),
            LifecycleEvent::Resized { .. } => self.resized(),
        }
    }

    /// Handle one event from the host
    ///
    /// A frame event advances playback before drawing. Returns `true` when
    /// a frame was drawn.
    pub fn handle_event(&mut self, event: HostEvent, ctx: &mut dyn DrawContext) -> bool {
        match event {
            HostEvent::Pointer(pointer) => {
                self.handle_pointer(pointer);
                false
            }
            HostEvent::Lifecycle(lifecycle) => {
                self.handle_lifecycle(lifecycle);
                false
            }
            HostEvent::Frame { dt } => {
                self.advance_playback(dt);
                self.frame(ctx, dt)
            }
        }
    }

    /// Lay the controls out against the host's current box
    ///
    /// Does nothing while detached or when the host cannot be measured.
    /// Running it twice in a row gives the same result.
    pub fn update(&mut self) {
        if !self.host.is_connected() {
            return;
        }
        let rect = match self.host.bounding_rect() {
            Ok(rect) => rect,
            Err(err) => {
                tracing::warn!("TimelineControls: layout skipped: {}", err);
                return;
            }
        };

        let dpr = self.host.device_pixel_ratio();
        self.host
            .set_canvas_size((rect.width() * dpr) as u32, (rect.height() * dpr) as u32);
        self.scene.transform_mut().set_uniform_scale(dpr);

        let button = self.config.button_size;
        let width = rect.width();
        let ids = self.ids;
        if let Some(node) = self.scene.get_mut(ids.run_stop) {
            node.transform_mut().set_translation(width - 2.0 * button, 0.0);
        }
        if let Some(node) = self.scene.get_mut(ids.menu) {
            node.transform_mut().set_translation(width - button, 0.0);
        }
        if let Some(node) = self.scene.get_mut(ids.seek_bar) {
            node.transform_mut().set_translation(button, 0.0);
            if let Some(seek) = node.as_seek_bar_mut() {
                seek.set_width(width - 3.0 * button);
            }
        }

        tracing::debug!(
            "TimelineControls: layout {}x{} @{}x, seek bar {}",
            rect.width(),
            rect.height(),
            dpr,
            width - 3.0 * button
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply queued drag input, sync the nodes with the model and draw
    ///
    /// Returns `false` when the render clock is stopped and nothing was
    /// drawn.
    pub fn frame(&mut self, ctx: &mut dyn DrawContext, dt: f64) -> bool {
        self.pump_input();

        let model = &self.model;
        let ids = self.ids;
        self.scene
            .render(ctx, dt, |scene, ctx, _frame| {
                ctx.reset_transform();
                let viewport = ctx.viewport_size();
                ctx.clear_rect(viewport.to_rect());
                sync_controls(scene, ids, model);
            })
            .is_some()
    }

    /// Advance playback by `dt` seconds
    pub fn advance_playback(&mut self, dt: f64) -> PlaybackStep {
        self.playback_clock.advance(&mut self.model, dt)
    }

    /// Playback speed multiplier
    pub fn set_playback_rate(&mut self, rate: f64) {
        self.playback_clock.rate = rate;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pointer Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Route an element-scoped pointer event
    ///
    /// Moves and releases are not element-scoped: they reach an active
    /// drag through the input bus and are ignored here.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Clicked { x, y, .. } => self.handle_click(Point::new(x, y)),
            PointerEvent::Pressed { x, y, .. } => self.handle_pointer_down(Point::new(x, y)),
            PointerEvent::Moved { .. } | PointerEvent::Released { .. } => {}
        }
    }

    /// Click at a page position
    pub fn handle_click(&mut self, page: Point) {
        let Some(local) = self.element_local(page) else {
            return;
        };
        self.dispatcher.dispatch(
            &mut self.scene,
            &mut self.model,
            local,
            HitMode::Bounds,
            PointerAction::Click,
        );
    }

    /// Press at a page position; starts a drag session
    pub fn handle_pointer_down(&mut self, page: Point) {
        let Some(local) = self.element_local(page) else {
            return;
        };
        self.dispatcher.dispatch(
            &mut self.scene,
            &mut self.model,
            local,
            HitMode::Bounds,
            PointerAction::Down,
        );
        self.drag = Some(DragSession::begin(&self.bus, local));
    }

    /// Apply document-level moves and releases queued for the drag
    ///
    /// Every node sees them, wherever the pointer is. A release ends the
    /// session; events queued after it are dropped.
    pub fn pump_input(&mut self) {
        let Some(session) = &self.drag else {
            return;
        };
        let events = session.take_events();

        for event in events {
            let action = match event {
                PointerEvent::Moved { .. } => PointerAction::Move,
                PointerEvent::Released { .. } => PointerAction::Up,
                PointerEvent::Pressed { .. } | PointerEvent::Clicked { .. } => continue,
            };
            let local = match self.host.to_local(event.position()) {
                Ok(local) => local,
                Err(err) => {
                    tracing::warn!("TimelineControls: dropping drag input: {}", err);
                    continue;
                }
            };
            self.dispatcher.dispatch(
                &mut self.scene,
                &mut self.model,
                local,
                HitMode::Unconditional,
                action,
            );
            if action == PointerAction::Up {
                self.drag = None;
                return;
            }
        }
    }

    /// Abandon the drag in progress, if any
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn element_local(&self, page: Point) -> Option<Point> {
        if self.disabled() {
            return None;
        }
        match self.host.to_local(page) {
            Ok(local) => Some(local),
            Err(err) => {
                tracing::warn!("TimelineControls: ignoring pointer input: {}", err);
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────────────────────

    pub fn model(&self) -> &PlaybackModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut PlaybackModel {
        &mut self.model
    }

    pub fn paused(&self) -> bool {
        self.model.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.model.paused = paused;
    }

    pub fn running(&self) -> bool {
        self.model.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.model.running = running;
    }

    pub fn play(&mut self) {
        self.model.play();
    }

    pub fn pause(&mut self) {
        self.model.pause();
    }

    pub fn run(&mut self) {
        self.model.run();
    }

    pub fn stop(&mut self) {
        self.model.stop();
    }

    pub fn hidden(&self) -> bool {
        self.host.has_class(HIDDEN_CLASS)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.host.set_class(HIDDEN_CLASS, hidden);
    }

    pub fn disabled(&self) -> bool {
        self.host.has_class(DISABLED_CLASS)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.host.set_class(DISABLED_CLASS, disabled);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Markers
    // ─────────────────────────────────────────────────────────────────────────

    /// Fold the markers into a seek target and jump to it
    ///
    /// Starting from `seed`, each marker (ascending) replaces the running
    /// candidate when `predicate(marker, candidate, current_time)` holds.
    /// A finite result is assigned to `current_time` as is, without
    /// clamping to the duration.
    pub fn next_marker<P>(&mut self, seed: f64, mut predicate: P) -> Option<f64>
    where
        P: FnMut(&Marker, f64, f64) -> bool,
    {
        let now = self.model.current_time;
        let mut candidate = seed;
        for marker in self.model.markers().iter() {
            if predicate(marker, candidate, now) {
                candidate = marker.time;
            }
        }

        if !candidate.is_finite() {
            return None;
        }
        self.model.current_time = candidate;
        Some(candidate)
    }

    /// Jump to the nearest marker after the current time
    pub fn seek_next_marker(&mut self) -> Option<f64> {
        self.next_marker(f64::INFINITY, |marker, candidate, now| {
            marker.time > now && marker.time < candidate
        })
    }

    /// Jump to the nearest marker before the current time
    pub fn seek_previous_marker(&mut self) -> Option<f64> {
        self.next_marker(f64::NEG_INFINITY, |marker, candidate, now| {
            marker.time < now && marker.time > candidate
        })
    }

    pub fn markers(&self) -> &Arc<Markers> {
        self.model.markers()
    }

    pub fn add_marker(&mut self, time: f64, kind: MarkerKind) -> Option<MarkerKind> {
        self.model.add_marker(time, kind)
    }

    pub fn remove_marker(&mut self, time: f64) -> Option<MarkerKind> {
        self.model.remove_marker(time)
    }

    pub fn clear_markers(&mut self) {
        self.model.clear_markers();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Nodes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn play_pause(&self) -> Option<&ToggleButton> {
        self.scene.get(self.ids.play_pause)?.as_toggle()
    }

    pub fn run_stop(&self) -> Option<&ToggleButton> {
        self.scene.get(self.ids.run_stop)?.as_toggle()
    }

    pub fn menu(&self) -> Option<&ToggleButton> {
        self.scene.get(self.ids.menu)?.as_toggle()
    }

    pub fn seek_bar(&self) -> Option<&SeekBar> {
        self.scene.get(self.ids.seek_bar)?.as_seek_bar()
    }
}

/// Push the model into the controls' animated targets
fn sync_controls(scene: &mut SceneGraph<ControlNode>, ids: ControlIds, model: &PlaybackModel) {
    if let Some(toggle) = scene.get_mut(ids.play_pause).and_then(ControlNode::as_toggle_mut) {
        toggle.set_target(if model.paused { 1.0 } else { 0.0 });
    }
    if let Some(toggle) = scene.get_mut(ids.run_stop).and_then(ControlNode::as_toggle_mut) {
        toggle.set_target(if model.running { 0.0 } else { 1.0 });
    }
    if let Some(seek) = scene.get_mut(ids.seek_bar).and_then(ControlNode::as_seek_bar_mut) {
        seek.current_time_mut()
            .set_default_value(model.current_time as f32);
        seek.duration_mut().set_default_value(model.duration as f32);
        seek.set_markers(Arc::clone(model.markers()));
    }
}
