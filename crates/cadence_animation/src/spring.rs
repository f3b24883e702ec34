//! Spring physics
//!
//! RK4-integrated damped spring. Large frame deltas are split into
//! sub-millisecond steps so very stiff springs (the seek bar runs at
//! stiffness 7000) stay stable at any frame rate. A delta longer than the
//! substep budget (a stalled frame) snaps the spring to its target.

/// Longest single integration step, in seconds
const MAX_SUBSTEP: f32 = 0.001;

/// Upper bound on substeps per `step` call
const MAX_SUBSTEPS: u32 = 1000;

/// Distance from target below which the spring may settle
const EPSILON: f32 = 1e-3;

/// Speed below which the spring may settle
const VELOCITY_EPSILON: f32 = 1e-2;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Unit-mass spring with the given stiffness and damping
    pub fn with_unit_mass(stiffness: f32, damping: f32) -> Self {
        Self::new(stiffness, damping, 1.0)
    }

    /// A stiff, snappy spring
    pub fn stiff() -> Self {
        Self::with_unit_mass(400.0, 30.0)
    }

    /// Critically damped spring for the given stiffness (no overshoot)
    pub fn critically_damped(stiffness: f32) -> Self {
        let mut config = Self::with_unit_mass(stiffness, 0.0);
        config.damping = config.critical_damping();
        config
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Check if the spring is overdamped (slow settling, no oscillation)
    pub fn is_overdamped(&self) -> bool {
        self.damping > self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start with an initial velocity
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget; the current velocity carries over
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` at rest
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil();
        if substeps > MAX_SUBSTEPS as f32 {
            tracing::debug!("Spring: {:.3}s step exceeds substep budget, snapping to target", dt);
            self.snap_to(self.target);
            return;
        }
        let substeps = (substeps as u32).max(1);
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.integrate(h);
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                break;
            }
        }
    }

    /// One RK4 step
    fn integrate(&mut self, dt: f32) {
        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::with_unit_mass(100.0, 20.0), 0.0);
        spring.set_target(1.0);

        run(&mut spring, 3.0);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_stiff_overdamped_spring_is_stable_at_frame_rate() {
        // Seek bar settings: a naive 16ms step would diverge
        let config = SpringConfig::with_unit_mass(7000.0, 400.0);
        assert!(config.is_overdamped());

        let mut spring = Spring::new(config, 1.0);
        spring.set_target(10.0);

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            assert!(spring.value() <= 10.0 + EPSILON);
            assert!(spring.value() >= 1.0 - EPSILON);
        }
        assert_eq!(spring.value(), 10.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let config = SpringConfig::with_unit_mass(180.0, 6.0);
        assert!(config.is_underdamped());

        let mut spring = Spring::new(config, 0.0);
        spring.set_target(1.0);

        let mut peak = 0.0f32;
        for _ in 0..60 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 1.0);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_initial_velocity_moves_resting_spring() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0).with_velocity(10.0);
        assert!(!spring.is_settled());

        spring.step(1.0 / 60.0);
        assert!(spring.value() > 0.0);
    }

    #[test]
    fn test_stalled_frame_snaps_stiff_spring() {
        let mut spring = Spring::new(SpringConfig::new(7000.0, 400.0, 1.0), 0.0);
        spring.set_target(5.0);
        spring.step(10.0);

        assert_eq!(spring.value(), 5.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_step_within_budget_still_integrates() {
        let mut spring = Spring::new(SpringConfig::new(100.0, 20.0, 1.0), 0.0);
        spring.set_target(1.0);
        spring.step(0.05);

        assert!(spring.value() > 0.0 && spring.value() < 1.0);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1.0);
        spring.step(0.0);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_critically_damped_preset() {
        let config = SpringConfig::critically_damped(100.0);
        assert_eq!(config.damping, 20.0);
        assert!(!config.is_underdamped());
        assert!(!config.is_overdamped());
    }
}
