//! Lander kinematics: gravity, axis thrusters, fuel and position integration.

use glam::Vec3;
use rand::Rng;

/// Reference tuning. Units are world units per tick.
pub mod defaults {
    /// Added to vertical velocity every tick.
    pub const GRAVITY: f32 = -0.1;
    /// Velocity delta of one lateral or longitudinal thruster per tick.
    pub const THRUST_POWER: f32 = 0.5;
    /// Fuel burned by one lateral or longitudinal thruster per tick.
    pub const FUEL_CONSUMPTION: f32 = 1.0;
    pub const MAX_FUEL: f32 = 1200.0;
    /// Position advances by `velocity * DT_SCALE` each tick.
    pub const DT_SCALE: f32 = 0.1;
    pub const INITIAL_ALTITUDE: f32 = 20000.0;
    pub const INITIAL_DESCENT_RATE: f32 = -10.0;
    /// Spawn x/y are drawn from `±START_OFFSET`.
    pub const START_OFFSET: f32 = 200.0;
    /// Spawn vx/vy are drawn from `±START_DRIFT`.
    pub const START_DRIFT: f32 = 5.0;
}

/// Tuning for the integrator and for spawning a fresh lander.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanderTuning {
    pub gravity: f32,
    pub thrust_power: f32,
    pub fuel_consumption: f32,
    pub max_fuel: f32,
    pub dt_scale: f32,
    pub initial_altitude: f32,
    pub initial_descent_rate: f32,
    pub start_offset: f32,
    pub start_drift: f32,
}

impl Default for LanderTuning {
    fn default() -> Self {
        Self {
            gravity: defaults::GRAVITY,
            thrust_power: defaults::THRUST_POWER,
            fuel_consumption: defaults::FUEL_CONSUMPTION,
            max_fuel: defaults::MAX_FUEL,
            dt_scale: defaults::DT_SCALE,
            initial_altitude: defaults::INITIAL_ALTITUDE,
            initial_descent_rate: defaults::INITIAL_DESCENT_RATE,
            start_offset: defaults::START_OFFSET,
            start_drift: defaults::START_DRIFT,
        }
    }
}

/// Kinematic state of the lander, which is also the camera. `position.z` is
/// altitude above the z = 0 surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LanderState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub fuel: f32,
}

impl LanderState {
    /// Fresh lander at the top of the descent with a random offset and drift.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &LanderTuning) -> Self {
        let offset = tuning.start_offset;
        let drift = tuning.start_drift;
        Self {
            position: Vec3::new(
                rng.gen_range(-offset..=offset),
                rng.gen_range(-offset..=offset),
                tuning.initial_altitude,
            ),
            velocity: Vec3::new(
                rng.gen_range(-drift..=drift),
                rng.gen_range(-drift..=drift),
                tuning.initial_descent_rate,
            ),
            fuel: tuning.max_fuel,
        }
    }

    pub fn with_position(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    pub fn with_velocity(self, velocity: Vec3) -> Self {
        Self { velocity, ..self }
    }

    pub fn with_fuel(self, fuel: f32) -> Self {
        Self { fuel, ..self }
    }

    pub fn altitude(&self) -> f32 {
        self.position.z
    }

    /// Magnitude of the velocity vector.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Thrusters requested this tick. Several may fire at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrustInput {
    /// -x
    pub left: bool,
    /// +x
    pub right: bool,
    /// -y
    pub forward: bool,
    /// +y
    pub back: bool,
    /// +z, double strength and double cost.
    pub vertical: bool,
}

impl ThrustInput {
    pub fn any(&self) -> bool {
        self.left || self.right || self.forward || self.back || self.vertical
    }
}

/// What happened during one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// At least one thruster fired (fuel was available).
    pub thrusting: bool,
    /// Thrust actually applied to velocity.
    pub thrust: Vec3,
}

/// Advances a [`LanderState`] by one tick.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    tuning: LanderTuning,
}

impl Integrator {
    pub fn new(tuning: LanderTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &LanderTuning {
        &self.tuning
    }

    /// One tick: burn fuel for requested thrusters (only while fuel > 0),
    /// apply gravity and thrust to velocity, then move.
    ///
    /// Opposing thrusters on one axis both burn fuel; the later one in
    /// left/right and forward/back order sets the axis.
    pub fn step(&self, lander: &mut LanderState, input: ThrustInput) -> StepReport {
        let t = &self.tuning;
        let mut thrust = Vec3::ZERO;
        let mut thrusting = false;

        if lander.fuel > 0.0 {
            if input.left {
                thrust.x = -t.thrust_power;
                lander.fuel -= t.fuel_consumption;
                thrusting = true;
            }
            if input.right {
                thrust.x = t.thrust_power;
                lander.fuel -= t.fuel_consumption;
                thrusting = true;
            }
            if input.forward {
                thrust.y = -t.thrust_power;
                lander.fuel -= t.fuel_consumption;
                thrusting = true;
            }
            if input.back {
                thrust.y = t.thrust_power;
                lander.fuel -= t.fuel_consumption;
                thrusting = true;
            }
            if input.vertical {
                thrust.z = t.thrust_power * 2.0;
                lander.fuel -= t.fuel_consumption * 2.0;
                thrusting = true;
            }
        }
        lander.fuel = lander.fuel.clamp(0.0, t.max_fuel);

        lander.velocity.z += t.gravity;
        lander.velocity += thrust;
        lander.position += lander.velocity * t.dt_scale;

        StepReport { thrusting, thrust }
    }
}
