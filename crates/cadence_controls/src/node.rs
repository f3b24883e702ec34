//! Scene node trait
//!
//! A node is a positioned, drawable element with a fixed-size hit box.
//! Pointer handlers receive node-local coordinates and the playback model
//! they may edit; every handler defaults to a no-op.

use cadence_animation::{AnimatedTransform, FrameTime};
use cadence_core::{DrawContext, Point, Size};

use crate::playback::PlaybackModel;

/// Pointer interaction routed to a node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Click,
    Down,
    Move,
    Up,
}

/// A drawable, optionally interactive scene element
pub trait Node {
    /// Hit-box size in local units
    fn size(&self) -> Size;

    /// Placement within the scene
    fn transform(&self) -> &AnimatedTransform;

    fn transform_mut(&mut self) -> &mut AnimatedTransform;

    /// Draw in local coordinates; the scene has already applied the
    /// node's transform
    fn draw(&mut self, ctx: &mut dyn DrawContext, frame: FrameTime);

    fn click(&mut self, _model: &mut PlaybackModel, _local: Point) {}

    fn pointer_down(&mut self, _model: &mut PlaybackModel, _local: Point) {}

    fn pointer_move(&mut self, _model: &mut PlaybackModel, _local: Point) {}

    fn pointer_up(&mut self, _model: &mut PlaybackModel, _local: Point) {}

    /// Route `action` to the matching handler
    fn handle(&mut self, action: PointerAction, model: &mut PlaybackModel, local: Point) {
        match action {
            PointerAction::Click => self.click(model, local),
            PointerAction::Down => self.pointer_down(model, local),
            PointerAction::Move => self.pointer_move(model, local),
            PointerAction::Up => self.pointer_up(model, local),
        }
    }
}
