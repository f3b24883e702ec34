//! Animated scalar values
//!
//! An `AnimatedValue` carries a target (`default_value`) and an
//! interpolation strategy that moves the presented value toward it. The
//! owner samples it once per frame with the frame's `(time, delta)`; static
//! reads between frames use `peek`.
//!
//! Strategies:
//!
//! - **Immediate**: the presented value is always the target
//! - **Spring**: RK4 spring, advanced by the frame delta

use crate::spring::{Spring, SpringConfig};

/// How an `AnimatedValue` approaches its target
#[derive(Clone, Debug)]
pub enum Interpolation {
    /// Jump straight to the target
    Immediate,
    /// Physically simulated spring
    Spring(Spring),
}

/// A scalar that evolves toward a target over frames
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    default_value: f32,
    interpolation: Interpolation,
}

impl AnimatedValue {
    /// Value that always presents its target
    pub fn immediate(value: f32) -> Self {
        Self {
            default_value: value,
            interpolation: Interpolation::Immediate,
        }
    }

    /// Spring-driven value at rest at `position`
    pub fn spring(config: SpringConfig, position: f32) -> Self {
        Self {
            default_value: position,
            interpolation: Interpolation::Spring(Spring::new(config, position)),
        }
    }

    /// Give a spring-driven value an initial velocity
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        if let Interpolation::Spring(spring) = &mut self.interpolation {
            *spring = spring.with_velocity(velocity);
        }
        self
    }

    /// Set the initial target without disturbing the presented value
    pub fn with_default_value(mut self, value: f32) -> Self {
        self.set_default_value(value);
        self
    }

    pub fn interpolation(&self) -> &Interpolation {
        &self.interpolation
    }

    /// The target the value is moving toward
    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Retarget; springs keep their velocity
    pub fn set_default_value(&mut self, value: f32) {
        if value == self.default_value {
            return;
        }
        self.default_value = value;
        match &mut self.interpolation {
            Interpolation::Immediate => {}
            Interpolation::Spring(spring) => spring.set_target(value),
        }
    }

    /// Final value once all motion has settled
    pub fn settled(&self) -> f32 {
        self.default_value
    }

    /// Jump to `value` with no motion
    pub fn set_immediate(&mut self, value: f32) {
        self.default_value = value;
        match &mut self.interpolation {
            Interpolation::Immediate => {}
            Interpolation::Spring(spring) => spring.snap_to(value),
        }
    }

    /// Advance by one frame and return the presented value
    ///
    /// Springs advance by `delta`; `time` is the frame time the value is
    /// presented at.
    pub fn sample(&mut self, _time: f64, delta: f32) -> f32 {
        match &mut self.interpolation {
            Interpolation::Immediate => self.default_value,
            Interpolation::Spring(spring) => {
                spring.step(delta);
                spring.value()
            }
        }
    }

    /// Presented value at `time` without advancing any state
    pub fn peek(&self, _time: f64) -> f32 {
        match &self.interpolation {
            Interpolation::Immediate => self.default_value,
            Interpolation::Spring(spring) => spring.value(),
        }
    }

    /// True while the presented value differs from the target
    pub fn is_animating(&self) -> bool {
        match &self.interpolation {
            Interpolation::Immediate => false,
            Interpolation::Spring(spring) => !spring.is_settled(),
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::immediate(0.0)
    }
}
