//! Core physics types and constants for the two-body simulation.

use bevy::math::DVec3;

/// Physical constants (SI units)

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.674e-11;

/// Kilometers to meters. Configuration is entered in km and km/s.
pub const KM_TO_METERS: f64 = 1e3;

/// Meters to kilometers
pub const METERS_TO_KM: f64 = 1.0 / KM_TO_METERS;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Earth mass in kilograms (default primary).
pub const EARTH_MASS: f64 = 5.972e24;

/// Physical state of a body in the simulation.
/// Uses f64 (DVec3) for physics accuracy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Position in meters
    pub pos: DVec3,
    /// Velocity in meters per second
    pub vel: DVec3,
    /// Mass in kilograms
    pub mass: f64,
}

impl BodyState {
    /// Create a new body state
    pub fn new(pos: DVec3, vel: DVec3, mass: f64) -> Self {
        Self { pos, vel, mass }
    }

    /// Build a state from kilometer-based inputs, scaling to meters.
    pub fn from_km(pos_km: DVec3, vel_km_s: DVec3, mass: f64) -> Self {
        Self::new(pos_km * KM_TO_METERS, vel_km_s * KM_TO_METERS, mass)
    }

    /// Position in km
    pub fn pos_km(&self) -> DVec3 {
        self.pos * METERS_TO_KM
    }

    /// Speed in km/s
    pub fn speed_km_per_s(&self) -> f64 {
        self.vel.length() * METERS_TO_KM
    }

    /// Advance position along the current velocity (no forces).
    pub fn drift(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }
}

/// True when every component is finite.
#[inline]
pub fn is_finite_vec(v: DVec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Wrap an angle in radians to [0, 2π).
#[inline]
pub fn wrap_tau(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU { 0.0 } else { wrapped }
}

/// Polar angle of the xy-projection in degrees, in [0, 360).
pub fn polar_angle_deg(v: DVec3) -> f64 {
    wrap_tau(v.y.atan2(v.x)) * RAD_TO_DEG
}
