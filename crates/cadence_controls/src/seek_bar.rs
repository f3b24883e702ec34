//! Seek bar
//!
//! A horizontal time axis with a cursor at the current time and a tick per
//! marker. Ticks near the cursor grow: the closer a tick is, the further its
//! top and bottom are pushed down, with a Gaussian-like falloff over a few
//! pixels.
//!
//! Pressing sets the playback position directly. Dragging and releasing
//! clamp the position to `[0, duration]`, so a drag that wanders past either
//! end pins to it.

use std::sync::Arc;

use cadence_animation::{AnimatedTransform, AnimatedValue, FrameTime};
use cadence_core::{DrawContext, DrawContextExt, Path, Point, Rect, Size};

use crate::config::{ControlStyle, SpringSettings};
use crate::node::Node;
use crate::playback::{MarkerKind, Markers, PlaybackModel};

/// Baseline the track is drawn on
const TRACK_Y: f32 = 16.0;

/// Vertical extent of the cursor
const CURSOR_TOP: f32 = 10.0;
const CURSOR_BOTTOM: f32 = 22.0;

/// Half-width of the window cleared behind the cursor
const CURSOR_CLEARANCE: f32 = 2.0;

/// Vertical segment of a marker tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickGeometry {
    pub x: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Tick segment for a marker at `x`, given the cursor at `cursor_x`
pub fn tick_geometry(x: f32, cursor_x: f32) -> TickGeometry {
    let distance = (cursor_x - x).abs();
    let factor = 2f32.powf(-(distance * distance) / 8.0);
    TickGeometry {
        x,
        top: 12.0 + 14.0 * factor,
        bottom: 20.0 + 7.0 * factor,
    }
}

/// Horizontal position of `time` on a bar `width` wide spanning `duration`
fn time_to_x(width: f32, time: f64, duration: f64) -> f32 {
    width * (time / duration) as f32
}

/// Time axis with cursor, marker ticks and drag-to-scrub
#[derive(Clone, Debug)]
pub struct SeekBar {
    current_time: AnimatedValue,
    duration: AnimatedValue,
    width: f32,
    height: f32,
    markers: Arc<Markers>,
    dragging: bool,
    transform: AnimatedTransform,
    style: ControlStyle,
}

impl SeekBar {
    /// Zero-width bar; layout sets the width
    pub fn new(height: f32, spring: SpringSettings, style: ControlStyle) -> Self {
        let config = spring.to_config();
        Self {
            current_time: AnimatedValue::spring(config, 0.0).with_velocity(spring.velocity),
            duration: AnimatedValue::spring(config, 1.0).with_velocity(spring.velocity),
            width: 0.0,
            height,
            markers: Arc::new(Markers::new()),
            dragging: false,
            transform: AnimatedTransform::new(),
            style,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn current_time(&self) -> &AnimatedValue {
        &self.current_time
    }

    pub fn current_time_mut(&mut self) -> &mut AnimatedValue {
        &mut self.current_time
    }

    pub fn duration(&self) -> &AnimatedValue {
        &self.duration
    }

    pub fn duration_mut(&mut self) -> &mut AnimatedValue {
        &mut self.duration
    }

    pub fn markers(&self) -> &Arc<Markers> {
        &self.markers
    }

    /// Share a marker snapshot for drawing
    pub fn set_markers(&mut self, markers: Arc<Markers>) {
        self.markers = markers;
    }

    /// Ticks for the presented time and duration
    ///
    /// Empty when the duration is not positive. Only `Tick` markers
    /// produce geometry.
    pub fn ticks(&self, time: f32, duration: f32) -> Vec<TickGeometry> {
        if duration <= 0.0 {
            return Vec::new();
        }
        let duration = f64::from(duration);
        let cursor_x = time_to_x(self.width, f64::from(time), duration);
        self.markers
            .iter()
            .filter(|marker| marker.kind == MarkerKind::Tick)
            .map(|marker| tick_geometry(time_to_x(self.width, marker.time, duration), cursor_x))
            .collect()
    }

    /// Time under local `x`, against the settled duration
    fn time_at(&self, x: f32) -> Option<f64> {
        if self.width <= 0.0 {
            return None;
        }
        Some(f64::from(x) / f64::from(self.width) * f64::from(self.duration.settled()))
    }

    /// Clamped against the model's own duration
    fn scrub(&self, model: &mut PlaybackModel, x: f32) {
        if let Some(time) = self.time_at(x) {
            model.scrub_to(time);
        }
    }
}

impl Node for SeekBar {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn transform(&self) -> &AnimatedTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut AnimatedTransform {
        &mut self.transform
    }

    fn draw(&mut self, ctx: &mut dyn DrawContext, frame: FrameTime) {
        let time = self.current_time.sample(frame.time, frame.delta);
        let duration = self.duration.sample(frame.time, frame.delta);

        let mut track = Path::new()
            .move_to(1.0, TRACK_Y)
            .line_to(self.width - 1.0, TRACK_Y);
        for tick in self.ticks(time, duration) {
            track.push_segment(Point::new(tick.x, tick.top), Point::new(tick.x, tick.bottom));
        }

        let style = &self.style;
        ctx.with_opacity(style.track_opacity, |ctx| {
            ctx.stroke_path(&track, &style.stroke, style.color);
        });

        if duration > 0.0 {
            let cursor_x = time_to_x(self.width, f64::from(time), f64::from(duration));
            ctx.clear_rect(Rect::new(
                cursor_x - CURSOR_CLEARANCE,
                CURSOR_TOP,
                CURSOR_CLEARANCE * 2.0,
                CURSOR_BOTTOM - CURSOR_TOP,
            ));
            let cursor = Path::line(
                Point::new(cursor_x, CURSOR_TOP),
                Point::new(cursor_x, CURSOR_BOTTOM),
            );
            ctx.stroke_path(&cursor, &style.stroke, style.color);
        }
    }

    fn pointer_down(&mut self, model: &mut PlaybackModel, local: Point) {
        let Some(time) = self.time_at(local.x) else {
            return;
        };
        model.current_time = time;
        self.dragging = true;
    }

    fn pointer_move(&mut self, model: &mut PlaybackModel, local: Point) {
        if !self.dragging {
            return;
        }
        self.scrub(model, local.x);
    }

    fn pointer_up(&mut self, model: &mut PlaybackModel, local: Point) {
        if !self.dragging {
            return;
        }
        self.scrub(model, local.x);
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{DrawCommand, RecordingContext};

    fn seek_bar(width: f32, duration: f32) -> SeekBar {
        let mut bar = SeekBar::new(
            32.0,
            SpringSettings::new(7000.0, 400.0),
            ControlStyle::default(),
        );
        bar.set_width(width);
        bar.duration_mut().set_immediate(duration);
        bar
    }

    #[test]
    fn test_tick_geometry_at_cursor_is_tallest() {
        let tick = tick_geometry(20.0, 20.0);
        assert_eq!(tick.top, 26.0);
        assert_eq!(tick.bottom, 27.0);

        let far = tick_geometry(80.0, 20.0);
        assert!((far.top - 12.0).abs() < 1e-6);
        assert!((far.bottom - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticks_follow_markers_and_cursor() {
        let mut bar = seek_bar(100.0, 10.0);
        bar.set_markers(Arc::new(
            [(2.0, MarkerKind::Tick), (8.0, MarkerKind::Tick)]
                .into_iter()
                .collect(),
        ));

        let ticks = bar.ticks(2.0, 10.0);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0], TickGeometry { x: 20.0, top: 26.0, bottom: 27.0 });
        assert_eq!(ticks[1].x, 80.0);
        assert!((ticks[1].top - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_non_tick_markers_draw_nothing() {
        let mut bar = seek_bar(100.0, 10.0);
        bar.set_markers(Arc::new(
            [(2.0, MarkerKind::Other(4)), (5.0, MarkerKind::Tick)]
                .into_iter()
                .collect(),
        ));
        assert_eq!(bar.ticks(0.0, 10.0).len(), 1);
    }

    #[test]
    fn test_empty_duration_draws_track_only() {
        let mut bar = seek_bar(100.0, 0.0);
        bar.set_markers(Arc::new([(2.0, MarkerKind::Tick)].into_iter().collect()));

        let mut ctx = RecordingContext::new(Size::new(100.0, 32.0));
        bar.draw(&mut ctx, FrameTime::default());

        let drawn: Vec<_> = ctx.drawing_commands().collect();
        assert_eq!(drawn.len(), 1);
        match drawn[0] {
            DrawCommand::StrokePath { path, opacity, .. } => {
                assert_eq!(path.commands().len(), 2);
                assert_eq!(*opacity, 0.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cursor_is_cleared_and_drawn_opaque() {
        let mut bar = seek_bar(100.0, 10.0);
        bar.current_time_mut().set_immediate(5.0);

        let mut ctx = RecordingContext::new(Size::new(100.0, 32.0));
        bar.draw(&mut ctx, FrameTime::default());

        let drawn: Vec<_> = ctx.drawing_commands().cloned().collect();
        assert_eq!(drawn.len(), 3);
        assert!(matches!(
            drawn[1],
            DrawCommand::ClearRect { rect, .. } if rect == Rect::new(48.0, 10.0, 4.0, 12.0)
        ));
        match &drawn[2] {
            DrawCommand::StrokePath { path, opacity, .. } => {
                assert_eq!(*opacity, 1.0);
                assert_eq!(path, &Path::line(Point::new(50.0, 10.0), Point::new(50.0, 22.0)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_press_is_unclamped_and_drag_clamps() {
        let mut bar = seek_bar(200.0, 10.0);
        let mut model = PlaybackModel::new();

        bar.pointer_down(&mut model, Point::new(100.0, 16.0));
        assert_eq!(model.current_time, 5.0);
        assert!(bar.is_dragging());

        bar.pointer_move(&mut model, Point::new(300.0, 16.0));
        assert_eq!(model.current_time, 10.0);

        bar.pointer_move(&mut model, Point::new(-50.0, 16.0));
        assert_eq!(model.current_time, 0.0);

        bar.pointer_up(&mut model, Point::new(50.0, 16.0));
        assert_eq!(model.current_time, 2.5);
        assert!(!bar.is_dragging());
    }

    #[test]
    fn test_drag_past_end_never_exceeds_model_duration() {
        // 0.1 widens when stored as f32
        let mut bar = seek_bar(200.0, 0.1);
        let mut model = PlaybackModel::new().with_duration(0.1);

        bar.pointer_down(&mut model, Point::new(40.0, 16.0));
        bar.pointer_move(&mut model, Point::new(5000.0, 16.0));
        assert!(model.current_time <= model.duration);
        assert_eq!(model.current_time, 0.1);

        bar.pointer_up(&mut model, Point::new(5000.0, 16.0));
        assert_eq!(model.current_time, model.duration);
    }

    #[test]
    fn test_press_past_end_is_not_clamped() {
        let mut bar = seek_bar(200.0, 10.0);
        let mut model = PlaybackModel::new();

        bar.pointer_down(&mut model, Point::new(300.0, 16.0));
        assert_eq!(model.current_time, 15.0);
    }

    #[test]
    fn test_press_uses_settled_duration() {
        let mut bar = seek_bar(200.0, 1.0);
        // Target changed but the spring has not moved yet
        bar.duration_mut().set_default_value(10.0);
        let mut model = PlaybackModel::new();

        bar.pointer_down(&mut model, Point::new(100.0, 0.0));
        assert_eq!(model.current_time, 5.0);
    }

    #[test]
    fn test_stray_move_and_release_are_ignored() {
        let mut bar = seek_bar(200.0, 10.0);
        let mut model = PlaybackModel::new();
        model.current_time = 3.0;

        bar.pointer_move(&mut model, Point::new(100.0, 0.0));
        bar.pointer_up(&mut model, Point::new(100.0, 0.0));
        assert_eq!(model.current_time, 3.0);
    }

    #[test]
    fn test_zero_width_ignores_press() {
        let mut bar = seek_bar(0.0, 10.0);
        let mut model = PlaybackModel::new();

        bar.pointer_down(&mut model, Point::new(10.0, 0.0));
        assert_eq!(model.current_time, 0.0);
        assert!(!bar.is_dragging());
    }
}
