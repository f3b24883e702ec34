//! Control node
//!
//! The widget's scene holds a fixed mix of toggles and one seek bar;
//! `ControlNode` lets them share a `SceneGraph` without boxing.

use cadence_animation::{AnimatedTransform, FrameTime};
use cadence_core::{DrawContext, Point, Size};

use crate::node::Node;
use crate::playback::PlaybackModel;
use crate::seek_bar::SeekBar;
use crate::toggle::ToggleButton;

/// Any node the transport controls place in their scene
#[derive(Clone, Debug)]
pub enum ControlNode {
    Toggle(ToggleButton),
    Seek(SeekBar),
}

impl ControlNode {
    pub fn as_toggle(&self) -> Option<&ToggleButton> {
        match self {
            ControlNode::Toggle(toggle) => Some(toggle),
            ControlNode::Seek(_) => None,
        }
    }

    pub fn as_toggle_mut(&mut self) -> Option<&mut ToggleButton> {
        match self {
            ControlNode::Toggle(toggle) => Some(toggle),
            ControlNode::Seek(_) => None,
        }
    }

    pub fn as_seek_bar(&self) -> Option<&SeekBar> {
        match self {
            ControlNode::Seek(seek) => Some(seek),
            ControlNode::Toggle(_) => None,
        }
    }

    pub fn as_seek_bar_mut(&mut self) -> Option<&mut SeekBar> {
        match self {
            ControlNode::Seek(seek) => Some(seek),
            ControlNode::Toggle(_) => None,
        }
    }

    fn inner(&self) -> &dyn Node {
        match self {
            ControlNode::Toggle(toggle) => toggle,
            ControlNode::Seek(seek) => seek,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Node {
        match self {
            ControlNode::Toggle(toggle) => toggle,
            ControlNode::Seek(seek) => seek,
        }
    }
}

impl From<ToggleButton> for ControlNode {
    fn from(toggle: ToggleButton) -> Self {
        ControlNode::Toggle(toggle)
    }
}

impl From<SeekBar> for ControlNode {
    fn from(seek: SeekBar) -> Self {
        ControlNode::Seek(seek)
    }
}

impl Node for ControlNode {
    fn size(&self) -> Size {
        self.inner().size()
    }

    fn transform(&self) -> &AnimatedTransform {
        self.inner().transform()
    }

    fn transform_mut(&mut self) -> &mut AnimatedTransform {
        self.inner_mut().transform_mut()
    }

    fn draw(&mut self, ctx: &mut dyn DrawContext, frame: FrameTime) {
        self.inner_mut().draw(ctx, frame);
    }

    fn click(&mut self, model: &mut PlaybackModel, local: Point) {
        self.inner_mut().click(model, local);
    }

    fn pointer_down(&mut self, model: &mut PlaybackModel, local: Point) {
        self.inner_mut().pointer_down(model, local);
    }

    fn pointer_move(&mut self, model: &mut PlaybackModel, local: Point) {
        self.inner_mut().pointer_move(model, local);
    }

    fn pointer_up(&mut self, model: &mut PlaybackModel, local: Point) {
        self.inner_mut().pointer_up(model, local);
    }
}
