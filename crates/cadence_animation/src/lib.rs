//! Cadence Animation
//!
//! Frame-driven animation primitives for Cadence controls.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs, substepped for stiff configurations
//! - **Easing**: the common polynomial curves plus exponential ease-out
//! - **Animated Values**: a target plus an interpolation strategy
//!   (immediate or spring), sampled once per frame
//! - **Animated Transforms**: translate/scale built from four animated values
//! - **Render Clock**: run/stop and play/pause lifecycle producing `(time, delta)` frames

pub mod clock;
pub mod easing;
pub mod spring;
pub mod transform;
pub mod value;

pub use clock::{FrameTime, RenderClock};
pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use transform::AnimatedTransform;
pub use value::{AnimatedValue, Interpolation};
