//! Animated translate/scale transform
//!
//! Every scene node positions itself with four independent animated
//! scalars. Sampling them yields an `Affine2D` that translates first and
//! scales about the translated origin.

use cadence_core::{Affine2D, Point};

use crate::value::AnimatedValue;

/// Translate + scale built from four animated values
#[derive(Clone, Debug)]
pub struct AnimatedTransform {
    pub translate_x: AnimatedValue,
    pub translate_y: AnimatedValue,
    pub scale_x: AnimatedValue,
    pub scale_y: AnimatedValue,
}

impl Default for AnimatedTransform {
    fn default() -> Self {
        Self {
            translate_x: AnimatedValue::immediate(0.0),
            translate_y: AnimatedValue::immediate(0.0),
            scale_x: AnimatedValue::immediate(1.0),
            scale_y: AnimatedValue::immediate(1.0),
        }
    }
}

impl AnimatedTransform {
    /// Identity transform with immediate interpolation
    pub fn new() -> Self {
        Self::default()
    }

    /// Target translation
    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.translate_x.set_default_value(x);
        self.translate_y.set_default_value(y);
    }

    /// Target scale
    pub fn set_scale(&mut self, sx: f32, sy: f32) {
        self.scale_x.set_default_value(sx);
        self.scale_y.set_default_value(sy);
    }

    /// Target uniform scale
    pub fn set_uniform_scale(&mut self, s: f32) {
        self.set_scale(s, s);
    }

    /// Advance all four values and build the frame's transform
    pub fn sample(&mut self, time: f64, delta: f32) -> Affine2D {
        Affine2D::translate_scale(
            self.translate_x.sample(time, delta),
            self.translate_y.sample(time, delta),
            self.scale_x.sample(time, delta),
            self.scale_y.sample(time, delta),
        )
    }

    /// Presented transform at `time`, without advancing
    pub fn peek(&self, time: f64) -> Affine2D {
        Affine2D::translate_scale(
            self.translate_x.peek(time),
            self.translate_y.peek(time),
            self.scale_x.peek(time),
            self.scale_y.peek(time),
        )
    }

    /// Presented translation at `time`, without advancing
    pub fn translation_at(&self, time: f64) -> Point {
        Point::new(self.translate_x.peek(time), self.translate_y.peek(time))
    }

    /// Target translation
    pub fn settled_translation(&self) -> Point {
        Point::new(self.translate_x.settled(), self.translate_y.settled())
    }
}
