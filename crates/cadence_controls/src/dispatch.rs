//! Hit testing and pointer dispatch
//!
//! Maps a widget-local pointer position to the nodes under it and routes
//! the interaction to each of them. Every matching node receives the event,
//! in insertion order; there is no single-target capture.
//!
//! Hit boxes are half-open: a node at `(tx, ty)` sized `w × h` contains
//! `tx <= x < tx + w` and `ty <= y < ty + h`. The node position is a static
//! read of its animated translation at the scene's current time.

use cadence_core::{Point, Rect};
use smallvec::SmallVec;

use crate::node::{Node, PointerAction};
use crate::playback::PlaybackModel;
use crate::scene::{NodeId, SceneGraph};

/// How candidates are selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitMode {
    /// Nodes whose hit box contains the point
    #[default]
    Bounds,
    /// Every node, for continuing a drag outside its bounds
    Unconditional,
}

/// A node selected by a hit test
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    /// Pointer position relative to the node's origin
    pub offset: Point,
}

/// Candidates for one event; the controls never have more than a handful
pub type HitList = SmallVec<[Hit; 4]>;

/// Routes widget-local pointer input to scene nodes
#[derive(Clone, Copy, Debug, Default)]
pub struct HitTestDispatcher;

impl HitTestDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Nodes at `point`, in insertion order
    pub fn hit_test<N: Node>(&self, scene: &SceneGraph<N>, point: Point, mode: HitMode) -> HitList {
        let time = scene.now();
        let mut hits = HitList::new();
        for (id, node) in scene.children() {
            let origin = node.transform().translation_at(time);
            let bounds = Rect::from_origin_size(origin, node.size());
            if mode == HitMode::Unconditional || self.point_in_bounds(point, &bounds) {
                hits.push(Hit {
                    node: id,
                    offset: Point::new(point.x - origin.x, point.y - origin.y),
                });
            }
        }
        hits
    }

    /// Hit-test `point` and deliver `action` to every candidate
    ///
    /// Returns the number of nodes that received the event.
    pub fn dispatch<N: Node>(
        &self,
        scene: &mut SceneGraph<N>,
        model: &mut PlaybackModel,
        point: Point,
        mode: HitMode,
        action: PointerAction,
    ) -> usize {
        let hits = self.hit_test(scene, point, mode);
        tracing::trace!(
            "HitTestDispatcher: {:?} at ({:.1}, {:.1}) {:?} -> {} node(s)",
            action,
            point.x,
            point.y,
            mode,
            hits.len()
        );
        for hit in &hits {
            if let Some(node) = scene.get_mut(hit.node) {
                node.handle(action, model, hit.offset);
            }
        }
        hits.len()
    }

    fn point_in_bounds(&self, point: Point, bounds: &Rect) -> bool {
        bounds.contains(point)
    }
}
