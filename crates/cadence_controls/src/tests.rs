//! End-to-end tests for the transport controls
//!
//! Each test mounts `TimelineControls` on a `HeadlessHost`, drives frames
//! into a `RecordingContext` and feeds pointer input the way a host would:
//! element-scoped presses and clicks directly, document-level moves and
//! releases through a private `InputBus`.

use cadence_core::{DrawCommand, Point, RecordingContext, Rect, Size};
use cadence_platform::{
    HeadlessHost, HostElement, HostEvent, InputBus, LifecycleEvent, MouseButton, PointerEvent,
};

use crate::config::ControlsConfig;
use crate::error::ControlsError;
use crate::node::Node;
use crate::playback::{MarkerKind, PlaybackStep};
use crate::seek_bar::tick_geometry;
use crate::widget::TimelineControls;

/// Strip wide enough for a 200px seek bar between the buttons
const WIDTH: f32 = 296.0;
const FRAME: f64 = 1.0 / 60.0;

/// Attached controls on a private bus, laid out and running
fn attached_controls() -> (TimelineControls<HeadlessHost>, InputBus) {
    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, WIDTH, 32.0));
    host.attach();
    let bus = InputBus::new();
    let mut controls = TimelineControls::new(host).with_bus(bus.clone());
    controls.connected();
    (controls, bus)
}

fn recording_context() -> RecordingContext {
    RecordingContext::new(Size::new(WIDTH, 32.0))
}

/// Draw `frames` frames so springs can settle
fn run_frames(controls: &mut TimelineControls<HeadlessHost>, frames: usize) {
    let mut ctx = recording_context();
    for _ in 0..frames {
        ctx.clear();
        controls.frame(&mut ctx, FRAME);
    }
}

fn layout_snapshot(controls: &TimelineControls<HeadlessHost>) -> Vec<(Point, Size)> {
    controls
        .scene()
        .children()
        .map(|(_, node)| (node.transform().settled_translation(), node.size()))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_layout_positions_controls() {
    let (controls, _bus) = attached_controls();

    assert_eq!(
        layout_snapshot(&controls),
        vec![
            (Point::new(0.0, 0.0), Size::new(32.0, 32.0)),
            (Point::new(WIDTH - 64.0, 0.0), Size::new(32.0, 32.0)),
            (Point::new(WIDTH - 32.0, 0.0), Size::new(32.0, 32.0)),
            (Point::new(32.0, 0.0), Size::new(200.0, 32.0)),
        ]
    );
    assert_eq!(controls.host().canvas_size(), (296, 32));
}

#[test]
fn test_layout_is_idempotent() {
    let (mut controls, _bus) = attached_controls();
    let first = layout_snapshot(&controls);
    let canvas = controls.host().canvas_size();

    controls.update();
    controls.update();

    assert_eq!(layout_snapshot(&controls), first);
    assert_eq!(controls.host().canvas_size(), canvas);
}

#[test]
fn test_layout_scales_canvas_by_pixel_ratio() {
    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, WIDTH, 32.0)).with_device_pixel_ratio(2.0);
    host.attach();
    let mut controls = TimelineControls::new(host).with_bus(InputBus::new());
    controls.connected();

    assert_eq!(controls.host().canvas_size(), (592, 64));
    assert_eq!(controls.scene().transform().scale_x.settled(), 2.0);
    // Hit boxes stay in CSS units
    assert_eq!(layout_snapshot(&controls)[3].1, Size::new(200.0, 32.0));
}

#[test]
fn test_resize_relayouts() {
    let (mut controls, _bus) = attached_controls();
    controls.host_mut().set_size(Size::new(400.0, 32.0));
    controls.resized();

    assert_eq!(controls.seek_bar().map(|seek| seek.width()), Some(304.0));
    assert_eq!(controls.host().canvas_size(), (400, 32));
}

#[test]
fn test_layout_while_detached_is_noop() {
    let host = HeadlessHost::new(Rect::new(0.0, 0.0, WIDTH, 32.0));
    let mut controls = TimelineControls::new(host).with_bus(InputBus::new());

    controls.update();
    assert_eq!(controls.host().canvas_size(), (0, 0));
    assert_eq!(controls.seek_bar().map(|seek| seek.width()), Some(0.0));
}

#[test]
fn test_measurement_failure_skips_layout() {
    let (mut controls, _bus) = attached_controls();
    controls
        .host_mut()
        .fail_measurement(Some("no layout box".to_string()));
    controls.host_mut().set_size(Size::new(500.0, 32.0));

    controls.update();
    assert_eq!(controls.host().canvas_size(), (296, 32));
    assert_eq!(controls.seek_bar().map(|seek| seek.width()), Some(200.0));
}

// ─────────────────────────────────────────────────────────────────────────────
// Frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_frame_resets_and_clears_before_drawing() {
    let (mut controls, _bus) = attached_controls();
    let mut ctx = recording_context();
    assert!(controls.frame(&mut ctx, FRAME));

    let commands = ctx.commands();
    assert!(matches!(commands[0], DrawCommand::ResetTransform));
    assert!(matches!(
        commands[1],
        DrawCommand::ClearRect { rect, .. } if rect == Rect::new(0.0, 0.0, WIDTH, 32.0)
    ));
}

#[test]
fn test_detached_widget_does_not_draw() {
    let (mut controls, _bus) = attached_controls();
    controls.host_mut().detach();
    controls.disconnected();

    let mut ctx = recording_context();
    assert!(!controls.frame(&mut ctx, FRAME));
    assert!(ctx.commands().is_empty());
}

#[test]
fn test_paused_shows_play_glyph() {
    let (mut controls, _bus) = attached_controls();
    assert!(controls.paused());

    run_frames(&mut controls, 120);

    let now = controls.scene().now();
    let weights = controls.play_pause().map(|toggle| toggle.weights_at(now));
    assert_eq!(weights, Some((1.0, 0.0)));
}

#[test]
fn test_paused_round_trip_restores_glyphs() {
    let (mut controls, _bus) = attached_controls();
    run_frames(&mut controls, 120);
    let now = controls.scene().now();
    let before = controls.play_pause().map(|toggle| toggle.weights_at(now));

    controls.set_paused(false);
    run_frames(&mut controls, 120);
    let now = controls.scene().now();
    assert_eq!(
        controls.play_pause().map(|toggle| toggle.weights_at(now)),
        Some((0.0, 1.0))
    );

    controls.set_paused(true);
    run_frames(&mut controls, 120);
    let now = controls.scene().now();
    assert_eq!(controls.play_pause().map(|toggle| toggle.weights_at(now)), before);
}

#[test]
fn test_run_stop_glyph_follows_running() {
    let (mut controls, _bus) = attached_controls();
    run_frames(&mut controls, 1);
    assert_eq!(controls.run_stop().map(|toggle| toggle.is_on()), Some(true));

    controls.run();
    run_frames(&mut controls, 1);
    assert_eq!(controls.run_stop().map(|toggle| toggle.is_on()), Some(false));
}

#[test]
fn test_sync_pushes_time_duration_and_markers() {
    let (mut controls, _bus) = attached_controls();
    controls.model_mut().current_time = 2.5;
    controls.model_mut().duration = 5.0;
    controls.add_marker(1.0, MarkerKind::Tick);
    run_frames(&mut controls, 1);

    let seek = controls.seek_bar().map(|seek| {
        (
            seek.current_time().settled(),
            seek.duration().settled(),
            seek.markers().len(),
        )
    });
    assert_eq!(seek, Some((2.5, 5.0, 1)));
}

#[test]
fn test_stalled_frame_keeps_seek_bar_finite() {
    let (mut controls, _bus) = attached_controls();
    run_frames(&mut controls, 30);
    controls.model_mut().current_time = 5.0;

    let mut ctx = recording_context();
    controls.frame(&mut ctx, 10.0);

    let now = controls.scene().now();
    let presented = controls.seek_bar().map(|seek| seek.current_time().peek(now));
    assert!(presented.is_some_and(f32::is_finite));

    run_frames(&mut controls, 600);
    let now = controls.scene().now();
    let seek = controls
        .seek_bar()
        .map(|seek| (seek.current_time().peek(now), seek.current_time().is_animating()));
    assert_eq!(seek, Some((5.0, false)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Pointer Input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_click_play_pause_toggles_paused() {
    let (mut controls, _bus) = attached_controls();
    controls.handle_click(Point::new(16.0, 16.0));
    assert!(!controls.paused());

    controls.handle_pointer(PointerEvent::Clicked {
        button: MouseButton::Left,
        x: 16.0,
        y: 16.0,
    });
    assert!(controls.paused());
}

#[test]
fn test_click_uses_host_offset() {
    let mut host = HeadlessHost::new(Rect::new(100.0, 50.0, WIDTH, 32.0));
    host.attach();
    let mut controls = TimelineControls::new(host).with_bus(InputBus::new());
    controls.connected();

    // Page position of the run/stop button's center
    controls.handle_click(Point::new(100.0 + WIDTH - 48.0, 66.0));
    assert!(controls.running());
    assert!(controls.paused());
}

#[test]
fn test_menu_click_leaves_model_alone() {
    let (mut controls, _bus) = attached_controls();
    let before = controls.model().clone();

    controls.handle_click(Point::new(WIDTH - 16.0, 16.0));

    assert_eq!(controls.model(), &before);
    assert_eq!(controls.menu().map(|menu| menu.is_on()), Some(true));
}

#[test]
fn test_press_and_drag_scrub_the_seek_bar() {
    let (mut controls, bus) = attached_controls();
    run_frames(&mut controls, 1);

    controls.handle_pointer_down(Point::new(32.0 + 100.0, 16.0));
    assert_eq!(controls.model().current_time, 5.0);
    assert!(controls.is_dragging());

    bus.publish(PointerEvent::Moved {
        x: 32.0 + 300.0,
        y: 16.0,
    });
    controls.pump_input();
    assert_eq!(controls.model().current_time, 10.0);
}

#[test]
fn test_drag_continues_outside_the_widget() {
    let (mut controls, bus) = attached_controls();
    run_frames(&mut controls, 1);
    controls.handle_pointer(PointerEvent::Pressed {
        button: MouseButton::Left,
        x: 132.0,
        y: 16.0,
    });

    bus.publish(PointerEvent::Moved { x: 82.0, y: 400.0 });
    run_frames(&mut controls, 1);
    assert_eq!(controls.model().current_time, 2.5);

    bus.publish(PointerEvent::Released {
        button: MouseButton::Left,
        x: -50.0,
        y: 400.0,
    });
    run_frames(&mut controls, 1);
    assert_eq!(controls.model().current_time, 0.0);
    assert!(!controls.is_dragging());
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_drag_past_end_stops_at_short_duration() {
    let (mut controls, bus) = attached_controls();
    controls.model_mut().duration = 0.1;
    run_frames(&mut controls, 1);

    controls.handle_pointer_down(Point::new(32.0 + 40.0, 16.0));
    bus.publish(PointerEvent::Moved { x: 5000.0, y: 16.0 });
    controls.pump_input();

    let model = controls.model();
    assert!(model.current_time <= model.duration);
    assert_eq!(model.current_time, 0.1);
}

#[test]
fn test_events_after_release_are_ignored() {
    let (mut controls, bus) = attached_controls();
    run_frames(&mut controls, 1);
    controls.handle_pointer_down(Point::new(132.0, 16.0));

    bus.publish(PointerEvent::Released {
        button: MouseButton::Left,
        x: 132.0,
        y: 16.0,
    });
    bus.publish(PointerEvent::Moved { x: 232.0, y: 16.0 });
    controls.pump_input();

    assert_eq!(controls.model().current_time, 5.0);
    assert!(!controls.is_dragging());
}

#[test]
fn test_global_moves_without_press_are_ignored() {
    let (mut controls, bus) = attached_controls();
    run_frames(&mut controls, 1);

    assert_eq!(bus.publish(PointerEvent::Moved { x: 132.0, y: 16.0 }), 0);
    controls.pump_input();
    assert_eq!(controls.model().current_time, 0.0);
}

#[test]
fn test_press_on_button_starts_inert_session() {
    let (mut controls, bus) = attached_controls();
    run_frames(&mut controls, 1);

    controls.handle_pointer_down(Point::new(16.0, 16.0));
    assert!(controls.is_dragging());

    // The seek bar never saw the press, so a drag across it scrubs nothing
    bus.publish(PointerEvent::Moved { x: 132.0, y: 16.0 });
    controls.pump_input();
    assert_eq!(controls.model().current_time, 0.0);
}

#[test]
fn test_detach_ends_drag_session() {
    let (mut controls, bus) = attached_controls();
    controls.handle_pointer_down(Point::new(132.0, 16.0));
    assert_eq!(bus.subscriber_count(), 1);

    controls.host_mut().detach();
    controls.disconnected();

    assert!(!controls.is_dragging());
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_cancel_drag_unsubscribes() {
    let (mut controls, bus) = attached_controls();
    controls.handle_pointer_down(Point::new(132.0, 16.0));
    controls.cancel_drag();
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_dropping_widget_unsubscribes() {
    let (mut controls, bus) = attached_controls();
    controls.handle_pointer_down(Point::new(132.0, 16.0));
    drop(controls);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_disabled_ignores_pointer_input() {
    let (mut controls, bus) = attached_controls();
    controls.set_disabled(true);
    assert!(controls.disabled());

    controls.handle_click(Point::new(16.0, 16.0));
    controls.handle_pointer_down(Point::new(132.0, 16.0));

    assert!(controls.paused());
    assert!(!controls.is_dragging());
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_hidden_sets_host_class() {
    let (mut controls, _bus) = attached_controls();
    assert!(!controls.hidden());

    controls.set_hidden(true);
    assert!(controls.host().has_class("hidden"));

    controls.set_hidden(false);
    assert!(!controls.hidden());
}

// ─────────────────────────────────────────────────────────────────────────────
// Markers & Playback
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_next_marker_picks_nearest_after_current() {
    let (mut controls, _bus) = attached_controls();
    for time in [1.0, 4.0, 7.0] {
        controls.add_marker(time, MarkerKind::Tick);
    }
    controls.model_mut().current_time = 3.0;

    let chosen = controls.next_marker(f64::INFINITY, |marker, candidate, now| {
        marker.time > now && marker.time < candidate
    });

    assert_eq!(chosen, Some(4.0));
    assert_eq!(controls.model().current_time, 4.0);
}

#[test]
fn test_next_marker_without_match_keeps_position() {
    let (mut controls, _bus) = attached_controls();
    controls.add_marker(1.0, MarkerKind::Tick);
    controls.model_mut().current_time = 3.0;

    assert_eq!(controls.seek_next_marker(), None);
    assert_eq!(controls.model().current_time, 3.0);
    assert_eq!(controls.seek_previous_marker(), Some(1.0));
}

#[test]
fn test_next_marker_does_not_clamp() {
    let (mut controls, _bus) = attached_controls();
    controls.add_marker(25.0, MarkerKind::Tick);

    assert_eq!(controls.seek_next_marker(), Some(25.0));
    assert_eq!(controls.model().current_time, 25.0);
}

#[test]
fn test_tick_grows_near_cursor() {
    let near = tick_geometry(100.0, 100.0);
    assert_eq!((near.top, near.bottom), (26.0, 27.0));

    let far = tick_geometry(0.0, 100.0);
    assert!((far.top - 12.0).abs() < 1e-4);
    assert!((far.bottom - 20.0).abs() < 1e-4);
}

#[test]
fn test_playback_advances_only_when_running_and_playing() {
    let (mut controls, _bus) = attached_controls();
    assert_eq!(controls.advance_playback(0.5), PlaybackStep::Idle);

    controls.run();
    controls.play();
    assert_eq!(controls.advance_playback(0.5), PlaybackStep::Advanced);
    assert_eq!(controls.model().current_time, 0.5);

    controls.set_playback_rate(2.0);
    controls.advance_playback(0.25);
    assert_eq!(controls.model().current_time, 1.0);
}

#[test]
fn test_host_events_drive_the_widget() {
    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, WIDTH, 32.0));
    host.attach();
    let mut controls = TimelineControls::new(host).with_bus(InputBus::new());
    let mut ctx = recording_context();

    assert!(!controls.handle_event(HostEvent::Lifecycle(LifecycleEvent::Attached), &mut ctx));
    assert_eq!(controls.seek_bar().map(|seek| seek.width()), Some(200.0));

    controls.run();
    controls.handle_event(
        HostEvent::Pointer(PointerEvent::Clicked {
            button: MouseButton::Left,
            x: 16.0,
            y: 16.0,
        }),
        &mut ctx,
    );
    assert!(!controls.paused());

    assert!(controls.handle_event(HostEvent::Frame { dt: 0.5 }, &mut ctx));
    assert_eq!(controls.model().current_time, 0.5);

    controls.handle_event(HostEvent::Lifecycle(LifecycleEvent::Detached), &mut ctx);
    assert!(!controls.handle_event(HostEvent::Frame { dt: 0.5 }, &mut ctx));
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_custom_button_size_drives_layout() {
    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, 400.0, 40.0));
    host.attach();
    let config = ControlsConfig {
        button_size: 40.0,
        ..Default::default()
    };
    let mut controls = TimelineControls::with_config(host, config)
        .expect("valid config")
        .with_bus(InputBus::new());
    controls.connected();

    assert_eq!(controls.seek_bar().map(|seek| seek.width()), Some(280.0));
    assert_eq!(layout_snapshot(&controls)[1].0, Point::new(320.0, 0.0));
}

#[test]
fn test_invalid_config_is_rejected() {
    let host = HeadlessHost::new(Rect::new(0.0, 0.0, WIDTH, 32.0));
    let config = ControlsConfig {
        stroke_width: 0.0,
        ..Default::default()
    };

    let result = TimelineControls::with_config(host, config);
    assert!(matches!(result, Err(ControlsError::InvalidConfig(_))));
}
