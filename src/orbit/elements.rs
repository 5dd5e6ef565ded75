//! Orbital element derivation from an initial state vector.

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::types::wrap_tau;

/// Below this specific angular momentum (m²/s) the trajectory is treated as
/// radial and has no usable ellipse parametrization.
pub const DEGENERATE_ANGULAR_MOMENTUM: f64 = 1e-6;

/// Scale-free form of the same check: |r0 × v0| relative to |r0|·|v0|.
/// Catches radial launches whose cross product is only rounding noise.
pub const DEGENERATE_SINE: f64 = 1e-12;

/// Below this eccentricity the periapsis direction is numerical noise, so the
/// initial position is used as the reference direction instead.
pub const CIRCULAR_ECCENTRICITY: f64 = 1e-9;

/// Classical elements of a bound planar orbit, relative to the primary.
/// All angular values in radians, distances in meters, time in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1)
    pub eccentricity: f64,
    /// Argument of periapsis in radians, measured from +x in [0, 2π)
    pub argument_of_periapsis: f64,
    /// Mean anomaly at the start of the run in radians
    pub mean_anomaly_at_epoch: f64,
    /// Mean motion in radians per second
    pub mean_motion: f64,
    /// Current true anomaly in radians. Updated by the engine each tick.
    pub true_anomaly: f64,
    /// Gravitational parameter μ (m³/s²)
    pub gm: f64,
    /// Clockwise motion in the xy-plane (angular momentum along -z)
    pub retrograde: bool,
}

impl OrbitalElements {
    /// Orbital period in seconds.
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion
    }

    /// Closest approach distance in meters.
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance in meters.
    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Specific orbital energy, -μ/(2a).
    pub fn specific_energy(&self) -> f64 {
        -self.gm / (2.0 * self.semi_major_axis)
    }
}

/// Outcome of inspecting an initial state.
#[derive(Clone, Debug, PartialEq)]
pub enum OrbitDecision {
    /// Radial or oscillatory trajectory; must be integrated numerically.
    Degenerate {
        /// |r0 × v0| in m²/s
        angular_momentum: f64,
    },
    /// Parabolic or hyperbolic trajectory (E ≥ 0); must be integrated numerically.
    Hyperbolic {
        /// Specific orbital energy in m²/s²
        energy: f64,
    },
    /// Bound ellipse with derived elements.
    Elliptical(OrbitalElements),
}

impl OrbitDecision {
    /// Elements if the orbit is elliptical.
    pub fn elements(&self) -> Option<&OrbitalElements> {
        match self {
            OrbitDecision::Elliptical(elements) => Some(elements),
            _ => None,
        }
    }
}

/// Classify the relative state (r0, v0) of the secondary around a primary with
/// gravitational parameter `gm`.
///
/// Pure function. `gm > 0` and `r0 != 0` are caller preconditions; violating
/// them yields NaN-filled elements rather than an error.
pub fn decide(r0: DVec3, v0: DVec3, gm: f64) -> OrbitDecision {
    let r0_mag = r0.length();
    let v0_sq = v0.length_squared();
    let energy = 0.5 * v0_sq - gm / r0_mag;

    let h = r0.cross(v0);
    let h_mag = h.length();
    if h_mag < DEGENERATE_ANGULAR_MOMENTUM || h_mag <= DEGENERATE_SINE * r0_mag * v0_sq.sqrt() {
        return OrbitDecision::Degenerate {
            angular_momentum: h_mag,
        };
    }
    if energy >= 0.0 {
        return OrbitDecision::Hyperbolic { energy };
    }

    let r_dot_v = r0.dot(v0);
    let e_vec = ((v0_sq - gm / r0_mag) * r0 - r_dot_v * v0) / gm;
    let e = e_vec.length();

    let semi_major_axis = -gm / (2.0 * energy);
    let mean_motion = (gm / semi_major_axis.powi(3)).sqrt();
    let retrograde = h.z < 0.0;

    let (argument_of_periapsis, theta0) = if e < CIRCULAR_ECCENTRICITY {
        // Periapsis undefined: measure anomalies from the starting position
        (wrap_tau(r0.y.atan2(r0.x)), 0.0)
    } else {
        let omega = wrap_tau(e_vec.y.atan2(e_vec.x));
        let cos_theta0 = (e_vec.dot(r0) / (e * r0_mag)).clamp(-1.0, 1.0);
        let mut theta0 = cos_theta0.acos();
        // Inbound: past apoapsis, heading for periapsis
        if r_dot_v < 0.0 {
            theta0 = TAU - theta0;
        }
        (omega, theta0)
    };

    let factor = ((1.0 - e) / (1.0 + e)).sqrt();
    let mut e0 = 2.0 * (factor * (theta0 / 2.0).tan()).atan();
    if e0 < 0.0 {
        e0 += TAU;
    }
    let mean_anomaly_at_epoch = e0 - e * e0.sin();

    OrbitDecision::Elliptical(OrbitalElements {
        semi_major_axis,
        eccentricity: e,
        argument_of_periapsis,
        mean_anomaly_at_epoch,
        mean_motion,
        true_anomaly: theta0,
        gm,
        retrograde,
    })
}
