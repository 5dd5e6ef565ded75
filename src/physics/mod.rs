//! Numerical propagation for the secondary body.
//!
//! Used whenever the orbit has no closed-form ellipse (radial or unbound
//! trajectories) or when numeric integration is requested explicitly.

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

pub use gravity::{MIN_SEPARATION_SQUARED, acceleration};
pub use integrator::{Rk4Step, STEP_REFERENCE_DISTANCE, effective_dt, rk4_step};
