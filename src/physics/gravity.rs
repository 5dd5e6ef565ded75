//! Gravitational acceleration toward the primary body.

use bevy::math::DVec3;

/// Squared separations at or below this (m²) are treated as a collision and
/// produce no acceleration.
pub const MIN_SEPARATION_SQUARED: f64 = 1e-12;

/// Acceleration of a test mass at `pos` toward a primary at `primary_pos`.
///
/// a = μ/|r|² · r̂ with r = primary_pos - pos. Returns zero when the bodies
/// (nearly) coincide or the separation is not finite, so a bad state never
/// feeds NaN into the integrator.
///
/// # Arguments
/// * `pos` - Position of the accelerated body (meters)
/// * `primary_pos` - Position of the primary (meters)
/// * `gm` - Gravitational parameter μ (m³/s²)
#[inline]
pub fn acceleration(pos: DVec3, primary_pos: DVec3, gm: f64) -> DVec3 {
    let delta = primary_pos - pos;
    let r_squared = delta.length_squared();

    if r_squared <= MIN_SEPARATION_SQUARED || !r_squared.is_finite() {
        return DVec3::ZERO;
    }

    let r = r_squared.sqrt();
    // delta/r is the unit vector toward the primary
    delta * (gm / (r_squared * r))
}
