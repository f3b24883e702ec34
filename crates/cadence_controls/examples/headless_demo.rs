//! Headless Transport Controls Demo
//!
//! Drives `TimelineControls` without a window:
//! - Mounts the controls on a `HeadlessHost` at 2x pixel density
//! - Loads a configuration from TOML
//! - Plays through a few seconds with markers, hopping between them
//! - Scrubs the seek bar with a press and a document-level drag
//!
//! Run with: RUST_LOG=debug cargo run -p cadence_controls --example headless_demo

use anyhow::Result;
use cadence_controls::prelude::*;
use cadence_core::DrawCommand;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
stroke_width = 1.5
color = 0xf0f0f0

[seek_spring]
stiffness = 5000.0
damping = 300.0
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut host = HeadlessHost::new(Rect::new(0.0, 0.0, 480.0, 32.0)).with_device_pixel_ratio(2.0);
    host.attach();

    let config = ControlsConfig::from_toml_str(CONFIG)?;
    let bus = InputBus::new();
    let mut controls = TimelineControls::with_config(host, config)?.with_bus(bus.clone());
    controls.connected();

    for time in [1.5, 4.0, 6.25, 8.0] {
        controls.add_marker(time, MarkerKind::Tick);
    }

    let (width, height) = controls.host().canvas_size();
    let mut ctx = RecordingContext::new(Size::new(width as f32, height as f32));
    let dt = 1.0 / 60.0;

    // Play for three seconds
    controls.run();
    controls.play();
    for _ in 0..180 {
        ctx.clear();
        controls.advance_playback(dt);
        controls.frame(&mut ctx, dt);
    }
    tracing::info!(
        "after 3s: t = {:.2}, {} draw commands in the last frame",
        controls.model().current_time,
        ctx.drawing_commands().count()
    );

    if let Some(time) = controls.seek_next_marker() {
        tracing::info!("next marker: {:.2}", time);
    }
    if let Some(time) = controls.seek_previous_marker() {
        tracing::info!("previous marker: {:.2}", time);
    }

    // Press a quarter of the way along the seek bar, then drag past its end
    controls.pause();
    let seek_width = controls.seek_bar().map(|seek| seek.width()).unwrap_or_default();
    controls.handle_pointer(PointerEvent::Pressed {
        button: MouseButton::Left,
        x: 32.0 + seek_width * 0.25,
        y: 16.0,
    });
    tracing::info!("pressed: t = {:.2}", controls.model().current_time);

    bus.publish(PointerEvent::Moved { x: 1000.0, y: 80.0 });
    bus.publish(PointerEvent::Released {
        button: MouseButton::Left,
        x: 1000.0,
        y: 80.0,
    });
    ctx.clear();
    controls.frame(&mut ctx, dt);
    tracing::info!(
        "released past the end: t = {:.2}, dragging = {}",
        controls.model().current_time,
        controls.is_dragging()
    );

    let cleared = ctx
        .commands()
        .iter()
        .filter(|cmd| matches!(cmd, DrawCommand::ClearRect { .. }))
        .count();
    tracing::info!("clear rects in the last frame: {}", cleared);

    controls.host_mut().detach();
    controls.disconnected();

    Ok(())
}
