//! Spring physics
//!
//! [`Spring`] integrates a damped harmonic oscillator with RK4.
//! [`SpringCurve`] runs a unit-mass spring from 0 to 1 over normalized
//! time so it can shape fixed-duration transitions.

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

/// `ln(1000)`: a spring whose envelope decays by this much is visually at rest
const SETTLE_DECAY: f32 = 6.907_755;

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A unit-mass spring with the given damping ratio, tuned so its
    /// envelope has decayed to 0.1% after one unit of time.
    pub fn settling_in_unit_time(damping_ratio: f32) -> Self {
        let ratio = damping_ratio.max(0.05);
        // Underdamped envelope is e^(-ζω₀t); past critical the slow pole dominates
        let omega = if ratio < 1.0 {
            SETTLE_DECAY / ratio
        } else {
            SETTLE_DECAY * (ratio + (ratio * ratio - 1.0).sqrt())
        };
        Self::new(omega * omega, 2.0 * ratio * omega, 1.0)
    }

    /// Damping relative to critical damping
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A value pulled towards a target by a spring
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f32, target: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance by `dt` using RK4
    pub fn step(&mut self, dt: f32) {
        let derive = |x: f32, v: f32| (v, self.acceleration(x, v));
        let (x, v) = (self.value, self.velocity);

        let (dx1, dv1) = derive(x, v);
        let (dx2, dv2) = derive(x + dx1 * dt * 0.5, v + dv1 * dt * 0.5);
        let (dx3, dv3) = derive(x + dx2 * dt * 0.5, v + dv2 * dt * 0.5);
        let (dx4, dv4) = derive(x + dx3 * dt, v + dv3 * dt);

        self.value = x + (dx1 + 2.0 * (dx2 + dx3) + dx4) * dt / 6.0;
        self.velocity = v + (dv1 + 2.0 * (dv2 + dv3) + dv4) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }
}

/// A spring used as a timing curve over normalized time
///
/// Starts at 0, may overshoot when underdamped and is exactly 1 at `t = 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringCurve {
    /// 1.0 is critically damped; below that the curve overshoots
    pub damping_ratio: f32,
    /// In total distances per unit of normalized time
    pub initial_velocity: f32,
}

impl SpringCurve {
    /// Integration steps per unit of normalized time
    const STEPS: u32 = 240;

    pub fn new(damping_ratio: f32, initial_velocity: f32) -> Self {
        Self {
            damping_ratio,
            initial_velocity,
        }
    }

    pub fn value_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let config = SpringConfig::settling_in_unit_time(self.damping_ratio);
        let mut spring = Spring::new(config, 0.0, 1.0).with_velocity(self.initial_velocity);

        let dt = 1.0 / Self::STEPS as f32;
        let whole = (t / dt).floor() as u32;
        for _ in 0..whole {
            spring.step(dt);
        }
        let rest = t - whole as f32 * dt;
        if rest > 0.0 {
            spring.step(rest);
        }
        spring.value()
    }
}
