//! Draw Context - Canvas Rendering API
//!
//! The `DrawContext` trait is the single surface Cadence controls draw into.
//! It mirrors a 2D canvas: a transform stack, an opacity stack, path
//! stroking/filling and rectangular clears. Backends (a browser canvas, a GPU
//! painter, a software rasterizer) implement it; `RecordingContext` captures
//! commands for tests and deferred replay.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     ctx.push_transform(Affine2D::translation(16.0, 16.0));
//!     ctx.push_opacity(0.5);
//!
//!     let path = Path::new().move_to(-7.0, -8.0).line_to(7.0, 0.0).line_to(-7.0, 8.0).close();
//!     ctx.stroke_path(&path, &Stroke::new(2.0), Color::WHITE);
//!
//!     ctx.pop_opacity();
//!     ctx.pop_transform();
//! }
//! ```

use crate::geometry::{Affine2D, Color, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Stroke
// ─────────────────────────────────────────────────────────────────────────────

/// Stroke parameters for `stroke_path`
///
/// Backends map `round` onto both the line cap and the line join; a
/// non-round stroke uses butt caps and miter joins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub round: bool,
}

impl Stroke {
    /// Square-ended stroke
    pub const fn new(width: f32) -> Self {
        Self {
            width,
            round: false,
        }
    }

    /// Round caps and joins, the style every transport glyph uses
    pub const fn rounded(width: f32) -> Self {
        Self { width, round: true }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// One segment of a canvas path
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Circular arc, canvas semantics: angles in radians, clockwise in
    /// y-down space. Connects to the current point with a straight line.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    /// Close the current subpath
    Close,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Start a subpath at `(x, y)`
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Circular arc around `(cx, cy)`
    pub fn arc(mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        self.commands.push(PathCommand::Arc {
            center: Point::new(cx, cy),
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Append a move/line command pair in place
    ///
    /// Used when segments are accumulated in a loop rather than chained.
    pub fn push_segment(&mut self, from: Point, to: Point) {
        self.commands.push(PathCommand::MoveTo(from));
        self.commands.push(PathCommand::LineTo(to));
    }

    /// Single segment from `from` to `to`
    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Canvas-style rendering API
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // Transform Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push a transform; it is concatenated with the current one so that
    /// it applies first (canvas `ctx.transform` semantics)
    fn push_transform(&mut self, transform: Affine2D);

    /// Undo the matching `push_transform`
    fn pop_transform(&mut self);

    /// Transform applied to the next drawing call
    fn current_transform(&self) -> Affine2D;

    /// Drop every pushed transform and return to identity
    fn reset_transform(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // Opacity Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Multiply the current opacity by `opacity`
    fn push_opacity(&mut self, opacity: f32);

    /// Undo the matching `push_opacity`
    fn pop_opacity(&mut self);

    /// Current combined opacity
    fn current_opacity(&self) -> f32;

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fill a path
    fn fill_path(&mut self, path: &Path, color: Color);

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);

    /// Clear a rectangle to transparent, under the current transform
    fn clear_rect(&mut self, rect: Rect);

    /// Size of the drawing surface in device pixels
    fn viewport_size(&self) -> Size;
}

/// Extension helpers for scoped state changes
pub trait DrawContextExt: DrawContext {
    /// Run `f` with `transform` pushed, popping it afterwards
    fn with_transform<F: FnOnce(&mut Self)>(&mut self, transform: Affine2D, f: F) {
        self.push_transform(transform);
        f(self);
        self.pop_transform();
    }

    /// Run `f` with `opacity` pushed, popping it afterwards
    fn with_opacity<F: FnOnce(&mut Self)>(&mut self, opacity: f32, f: F) {
        self.push_opacity(opacity);
        f(self);
        self.pop_opacity();
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// One call made against a `RecordingContext`
///
/// Drawing commands carry the transform and opacity that were in effect
/// when they were issued, so a recording can be inspected without replaying
/// the state stack.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Affine2D),
    PopTransform,
    ResetTransform,
    PushOpacity(f32),
    PopOpacity,

    // Drawing
    FillPath {
        path: Path,
        color: Color,
        transform: Affine2D,
        opacity: f32,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        color: Color,
        transform: Affine2D,
        opacity: f32,
    },
    ClearRect {
        rect: Rect,
        transform: Affine2D,
    },
}

impl DrawCommand {
    /// True for commands that produce pixels (or erase them)
    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillPath { .. } | DrawCommand::StrokePath { .. } | DrawCommand::ClearRect { .. }
        )
    }
}

/// `DrawContext` that records instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Affine2D>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Empty recording for a surface of `viewport` device pixels
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Affine2D::IDENTITY],
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the commands that touch pixels
    pub fn drawing_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| c.is_drawing())
    }

    /// Forget recorded commands and reset both stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Affine2D::IDENTITY];
        self.opacity_stack = vec![1.0];
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Affine2D) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        } else {
            tracing::warn!("RecordingContext: pop_transform without a matching push");
        }
    }

    fn current_transform(&self) -> Affine2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or(Affine2D::IDENTITY)
    }

    fn reset_transform(&mut self) {
        self.commands.push(DrawCommand::ResetTransform);
        self.transform_stack.truncate(1);
        if let Some(root) = self.transform_stack.first_mut() {
            *root = Affine2D::IDENTITY;
        }
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = *self.opacity_stack.last().unwrap_or(&1.0);
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        } else {
            tracing::warn!("RecordingContext: pop_opacity without a matching push");
        }
    }

    fn current_opacity(&self) -> f32 {
        *self.opacity_stack.last().unwrap_or(&1.0)
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
            transform: self.current_transform(),
            opacity: self.current_opacity(),
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: *stroke,
            color,
            transform: self.current_transform(),
            opacity: self.current_opacity(),
        });
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::ClearRect {
            rect,
            transform: self.current_transform(),
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
