//! Scene graph and draw loop
//!
//! Owns nodes in insertion order, a render clock and a root transform
//! (device pixel ratio). Each frame it advances the clock, hands the frame
//! to a callback (where the owner syncs node targets), then draws every
//! node under `root * node` transform.

use cadence_animation::{AnimatedTransform, FrameTime, RenderClock};
use cadence_core::{DrawContext, DrawContextExt};
use slotmap::{new_key_type, SlotMap};

use crate::node::Node;

new_key_type! {
    /// Handle to a node in a `SceneGraph`
    pub struct NodeId;
}

/// Retained list of nodes with a clock-driven draw loop
#[derive(Debug)]
pub struct SceneGraph<N: Node> {
    nodes: SlotMap<NodeId, N>,
    order: Vec<NodeId>,
    clock: RenderClock,
    transform: AnimatedTransform,
}

impl<N: Node> Default for SceneGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Node> SceneGraph<N> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: Vec::new(),
            clock: RenderClock::new(),
            transform: AnimatedTransform::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a node; it draws above and dispatches after earlier nodes
    pub fn add_child(&mut self, node: N) -> NodeId {
        let id = self.nodes.insert(node);
        self.order.push(id);
        id
    }

    pub fn remove_child(&mut self, id: NodeId) -> Option<N> {
        let node = self.nodes.remove(id)?;
        self.order.retain(|other| *other != id);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id)
    }

    /// Nodes in insertion order
    pub fn children(&self) -> impl Iterator<Item = (NodeId, &N)> {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(*id).map(|node| (*id, node)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clock
    // ─────────────────────────────────────────────────────────────────────────

    pub fn clock(&self) -> &RenderClock {
        &self.clock
    }

    pub fn run(&mut self) {
        self.clock.run();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Current scene time
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Root transform applied before every node's own
    pub fn transform(&self) -> &AnimatedTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut AnimatedTransform {
        &mut self.transform
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance the clock by `dt`, run `on_frame`, then draw
    ///
    /// Returns the frame drawn, or `None` when the clock is stopped.
    pub fn render<F>(&mut self, ctx: &mut dyn DrawContext, dt: f64, on_frame: F) -> Option<FrameTime>
    where
        F: FnOnce(&mut Self, &mut dyn DrawContext, FrameTime),
    {
        let frame = self.clock.advance(dt)?;
        on_frame(self, ctx, frame);
        self.draw(ctx, frame);
        Some(frame)
    }

    /// Draw every node for `frame`
    pub fn draw(&mut self, ctx: &mut dyn DrawContext, frame: FrameTime) {
        let root = self.transform.sample(frame.time, frame.delta);
        for id in &self.order {
            let Some(node) = self.nodes.get_mut(*id) else {
                continue;
            };
            let local = node.transform_mut().sample(frame.time, frame.delta);
            ctx.with_transform(root.then(&local), |ctx| node.draw(ctx, frame));
        }
    }
}
