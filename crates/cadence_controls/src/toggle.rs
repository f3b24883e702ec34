//! Toggle buttons
//!
//! A toggle button shows one of two glyphs depending on a single animated
//! state value in [0, 1]. While the value travels, the glyphs cross-fade:
//! each glyph is weighted by an eased curve that only starts once the value
//! is a third of the way toward it, so the swap has a short dead zone in the
//! middle instead of a linear blend. A weight scales its glyph about the
//! hit-box center and doubles as its opacity.
//!
//! The three kinds differ only in their glyphs and click action:
//!
//! | Kind        | zero glyph    | one glyph      | click                  |
//! |-------------|---------------|----------------|------------------------|
//! | `PlayPause` | pause bars    | play triangle  | toggles `paused`       |
//! | `RunStop`   | stop square   | run triangle   | toggles `running`      |
//! | `Menu`      | three dots    | chevron        | flips its own target   |

use std::f32::consts::TAU;

use cadence_animation::{AnimatedTransform, AnimatedValue, Easing, FrameTime};
use cadence_core::{Affine2D, DrawContext, DrawContextExt, Path, Point, Size};

use crate::config::{ControlStyle, SpringSettings};
use crate::node::Node;
use crate::playback::PlaybackModel;

/// Weight of the "one" glyph for state value `v`
///
/// Zero for `v <= 1/3`; not clamped above, so spring overshoot is allowed.
pub fn weight_one(v: f32) -> f32 {
    Easing::EaseOutExpo.apply((1.5 * v - 0.5).max(0.0))
}

/// Weight of the "zero" glyph for state value `v`
///
/// Zero for `v >= 2/3`.
pub fn weight_zero(v: f32) -> f32 {
    Easing::EaseOutExpo.apply((-1.5 * v + 1.0).max(0.0))
}

// ─────────────────────────────────────────────────────────────────────────────
// Toggle Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Which control a toggle button is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleKind {
    PlayPause,
    RunStop,
    Menu,
}

impl ToggleKind {
    /// Glyph shown when the state value is 0, centered on the origin
    pub fn draw_zero(&self, ctx: &mut dyn DrawContext, style: &ControlStyle) {
        match self {
            ToggleKind::PlayPause => {
                let bars = Path::new()
                    .move_to(-6.0, -8.0)
                    .line_to(-6.0, 8.0)
                    .move_to(6.0, -8.0)
                    .line_to(6.0, 8.0);
                ctx.stroke_path(&bars, &style.stroke, style.color);
            }
            ToggleKind::RunStop => {
                let square = Path::new()
                    .move_to(-7.0, -7.0)
                    .line_to(-7.0, 7.0)
                    .line_to(7.0, 7.0)
                    .line_to(7.0, -7.0)
                    .close();
                ctx.stroke_path(&square, &style.stroke, style.color);
            }
            ToggleKind::Menu => {
                let dots = Path::new()
                    .arc(-6.0, 0.0, 1.5, 0.0, TAU)
                    .arc(0.0, 0.0, 1.5, 0.0, TAU)
                    .arc(6.0, 0.0, 1.5, 0.0, TAU);
                ctx.fill_path(&dots, style.color);
            }
        }
    }

    /// Glyph shown when the state value is 1, centered on the origin
    pub fn draw_one(&self, ctx: &mut dyn DrawContext, style: &ControlStyle) {
        let glyph = match self {
            ToggleKind::PlayPause => Path::new()
                .move_to(-7.0, -8.0)
                .line_to(7.0, 0.0)
                .line_to(-7.0, 8.0)
                .close(),
            ToggleKind::RunStop => Path::new()
                .move_to(-8.0, 7.0)
                .line_to(0.0, -8.0)
                .line_to(8.0, 7.0)
                .close(),
            ToggleKind::Menu => Path::new()
                .move_to(-6.0, -3.0)
                .line_to(0.0, 4.0)
                .line_to(6.0, -3.0),
        };
        ctx.stroke_path(&glyph, &style.stroke, style.color);
    }

    /// Apply the click action
    pub fn click(&self, state: &mut AnimatedValue, model: &mut PlaybackModel) {
        match self {
            ToggleKind::PlayPause => {
                if model.paused {
                    model.play();
                } else {
                    model.pause();
                }
            }
            ToggleKind::RunStop => {
                if model.running {
                    model.stop();
                } else {
                    model.run();
                }
            }
            ToggleKind::Menu => {
                let next = if state.default_value() == 0.0 { 1.0 } else { 0.0 };
                state.set_default_value(next);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Toggle Button
// ─────────────────────────────────────────────────────────────────────────────

/// Binary-state control with an animated cross-fade
#[derive(Clone, Debug)]
pub struct ToggleButton {
    kind: ToggleKind,
    state: AnimatedValue,
    transform: AnimatedTransform,
    size: Size,
    style: ControlStyle,
}

impl ToggleButton {
    /// Square button of the given kind, state at rest at 0
    pub fn new(kind: ToggleKind, size: f32, spring: SpringSettings, style: ControlStyle) -> Self {
        Self {
            kind,
            state: AnimatedValue::spring(spring.to_config(), 0.0).with_velocity(spring.velocity),
            transform: AnimatedTransform::new(),
            size: Size::new(size, size),
            style,
        }
    }

    pub fn kind(&self) -> ToggleKind {
        self.kind
    }

    /// The animated state value
    pub fn state(&self) -> &AnimatedValue {
        &self.state
    }

    /// Target the state value
    pub fn set_target(&mut self, target: f32) {
        self.state.set_default_value(target);
    }

    /// Settled state, as a boolean
    pub fn is_on(&self) -> bool {
        self.state.settled() != 0.0
    }

    /// Glyph weights `(one, zero)` at the presented state value
    pub fn weights_at(&self, time: f64) -> (f32, f32) {
        let v = self.state.peek(time);
        (weight_one(v), weight_zero(v))
    }

    fn draw_glyph(
        &self,
        ctx: &mut dyn DrawContext,
        weight: f32,
        glyph: impl FnOnce(&mut dyn DrawContext),
    ) {
        let center = self.size.to_rect().center();
        ctx.with_transform(
            Affine2D::translate_scale(center.x, center.y, weight, weight),
            |ctx| ctx.with_opacity(weight, |ctx| glyph(ctx)),
        );
    }
}

impl Node for ToggleButton {
    fn size(&self) -> Size {
        self.size
    }

    fn transform(&self) -> &AnimatedTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut AnimatedTransform {
        &mut self.transform
    }

    fn draw(&mut self, ctx: &mut dyn DrawContext, frame: FrameTime) {
        let v = self.state.sample(frame.time, frame.delta);
        let kind = self.kind;
        let style = &self.style;

        // "one" first so "zero" lands on top
        self.draw_glyph(ctx, weight_one(v), |ctx| kind.draw_one(ctx, style));
        self.draw_glyph(ctx, weight_zero(v), |ctx| kind.draw_zero(ctx, style));
    }

    fn click(&mut self, model: &mut PlaybackModel, _local: Point) {
        self.kind.click(&mut self.state, model);
    }
}
