//! Cadence Core
//!
//! Foundational types shared by every Cadence crate:
//!
//! - **Geometry**: points, sizes, rectangles and 2D affine transforms
//! - **Color**: RGBA foreground colors parsed from packed hex
//! - **Paths**: canvas-style vector path construction (move/line/arc/close)
//! - **Draw Context**: the rendering API controls draw into, plus a
//!   `RecordingContext` that captures commands for replay and inspection
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Affine2D, Color, DrawContext, Path, RecordingContext, Size, Stroke};
//!
//! let mut ctx = RecordingContext::new(Size::new(320.0, 32.0));
//! ctx.push_transform(Affine2D::translation(16.0, 16.0));
//! ctx.stroke_path(&Path::new().move_to(-6.0, -8.0).line_to(-6.0, 8.0), &Stroke::new(2.0), Color::WHITE);
//! ctx.pop_transform();
//!
//! assert_eq!(ctx.commands().len(), 3);
//! ```

pub mod draw;
pub mod geometry;

pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, Path, PathCommand, RecordingContext, Stroke,
};
pub use geometry::{Affine2D, Color, Point, Rect, Size};
