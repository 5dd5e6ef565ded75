//! Numerical integrator for the two-body problem.
//!
//! Classical 4th-order Runge-Kutta on (position' = velocity,
//! velocity' = acceleration(position)) with a distance-based step limiter.

use bevy::math::DVec3;

use super::gravity::acceleration;
use crate::types::is_finite_vec;

/// Separation (meters) at which the step limiter starts shrinking dt.
pub const STEP_REFERENCE_DISTANCE: f64 = 1e6;

/// Result of one RK4 step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rk4Step {
    /// New position (meters)
    pub position: DVec3,
    /// New velocity (m/s)
    pub velocity: DVec3,
    /// Step size actually integrated (seconds)
    pub dt_eff: f64,
}

impl Rk4Step {
    /// Whether the step produced a usable state.
    pub fn is_finite(&self) -> bool {
        is_finite_vec(self.position) && is_finite_vec(self.velocity)
    }
}

/// Shrink `dt` linearly once the bodies are closer than
/// [`STEP_REFERENCE_DISTANCE`]: dt_eff = dt · min(1, distance / D).
#[inline]
pub fn effective_dt(dt: f64, distance: f64) -> f64 {
    dt * (distance / STEP_REFERENCE_DISTANCE).min(1.0)
}

/// Advance the secondary by one RK4 step around a primary fixed at
/// `primary_pos` for the duration of the step.
///
/// The step size is limited once, from the separation at the start of the
/// step; all four stages share that `dt_eff`. Stage derivatives are combined
/// with weights 1:2:2:1 over 6.
pub fn rk4_step(pos: DVec3, vel: DVec3, primary_pos: DVec3, gm: f64, dt: f64) -> Rk4Step {
    let distance = (primary_pos - pos).length();
    let h = effective_dt(dt, distance);
    let acc = |p: DVec3| acceleration(p, primary_pos, gm);

    let k1_v = acc(pos) * h;
    let k1_r = vel * h;

    let k2_v = acc(pos + k1_r * 0.5) * h;
    let k2_r = (vel + k1_v * 0.5) * h;

    let k3_v = acc(pos + k2_r * 0.5) * h;
    let k3_r = (vel + k2_v * 0.5) * h;

    let k4_v = acc(pos + k3_r) * h;
    let k4_r = (vel + k3_v) * h;

    Rk4Step {
        position: pos + (k1_r + k2_r * 2.0 + k3_r * 2.0 + k4_r) / 6.0,
        velocity: vel + (k1_v + k2_v * 2.0 + k3_v * 2.0 + k4_v) / 6.0,
        dt_eff: h,
    }
}

// =============================================================================
// Tests
// =============================================================================
