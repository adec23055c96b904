//! Lander physics for the descent: a per-tick kinematic integrator plus
//! sphere-vs-obstacle collision and touchdown checks.

pub mod collision;
pub mod integrator;

pub use collision::*;
pub use integrator::*;
