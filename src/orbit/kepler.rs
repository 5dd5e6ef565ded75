//! Kepler orbit propagation using Newton's method for the Kepler equation.

use bevy::math::DVec3;

use super::OrbitalElements;
use crate::types::{RAD_TO_DEG, wrap_tau};

/// Newton-Raphson iteration cap. Keeps every tick O(1).
pub const MAX_NEWTON_ITERATIONS: usize = 8;

/// Stop iterating once |E - e·sin(E) - M| drops below this.
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Starting value for the Newton-Raphson solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeplerSeed {
    /// E₀ = M + e·sin(M)
    #[default]
    Standard,
    /// E₀ = M + e·sin(M) / (1 - sin(M + e) + sin(M)).
    ///
    /// Reproduces trajectories from earlier builds. At high eccentricity
    /// this guess can start far from the root and still miss the tolerance
    /// after the capped iterations.
    Legacy,
}

impl KeplerSeed {
    /// Initial eccentric anomaly for mean anomaly `m` and eccentricity `e`.
    pub fn initial_guess(self, m: f64, e: f64) -> f64 {
        match self {
            KeplerSeed::Standard => m + e * m.sin(),
            KeplerSeed::Legacy => m + e * m.sin() / (1.0 - (m + e).sin() + m.sin()),
        }
    }
}

/// Solve Kepler's equation M = E - e*sin(E) for eccentric anomaly E
/// using Newton's method.
///
/// `mean_anomaly` is used as-is, without reduction to [0, 2π), so E grows
/// with M over successive orbits.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64, seed: KeplerSeed) -> f64 {
    let e = eccentricity;
    let m = mean_anomaly;
    let mut e_anomaly = seed.initial_guess(m, e);

    for _ in 0..MAX_NEWTON_ITERATIONS {
        // f(E) = E - e*sin(E) - M
        let f = e_anomaly - e * e_anomaly.sin() - m;
        if f.abs() < KEPLER_TOLERANCE {
            break;
        }
        // f'(E) = 1 - e*cos(E)
        let f_prime = 1.0 - e * e_anomaly.cos();
        e_anomaly -= f / f_prime;
    }

    e_anomaly
}

/// Compute true anomaly from eccentric anomaly.
///
/// Half-angle form, the exact inverse of E = 2·atan(√((1-e)/(1+e))·tan(θ/2)).
pub fn eccentric_to_true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let e = eccentricity;
    let half_e = eccentric_anomaly / 2.0;
    let y = (1.0 + e).sqrt() * half_e.sin();
    let x = (1.0 - e).sqrt() * half_e.cos();
    2.0 * y.atan2(x)
}

/// Instantaneous state on the ellipse, relative to the primary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSample {
    /// Position relative to the primary (meters)
    pub position: DVec3,
    /// Velocity relative to the primary (m/s)
    pub velocity: DVec3,
    /// Vis-viva speed (m/s)
    pub speed: f64,
    /// Distance from the primary (meters)
    pub radius: f64,
    /// True anomaly (radians)
    pub true_anomaly: f64,
    /// Kepler equation residual left by the solver
    pub residual: f64,
}

impl KeplerSample {
    /// True anomaly in degrees, in [0, 360).
    pub fn true_anomaly_deg(&self) -> f64 {
        wrap_tau(self.true_anomaly) * RAD_TO_DEG
    }

    /// Whether position and velocity are usable.
    pub fn is_finite(&self) -> bool {
        crate::types::is_finite_vec(self.position)
            && crate::types::is_finite_vec(self.velocity)
            && self.speed.is_finite()
    }
}

/// Evaluates an elliptical orbit at arbitrary elapsed time.
///
/// Stateless apart from the seed choice: each sample is a pure function of
/// the elements and elapsed time, so there is no drift between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeplerPropagator {
    pub seed: KeplerSeed,
}

impl KeplerPropagator {
    pub fn new(seed: KeplerSeed) -> Self {
        Self { seed }
    }

    /// Sample the orbit `elapsed` seconds after the epoch.
    pub fn advance(&self, elements: &OrbitalElements, elapsed: f64) -> KeplerSample {
        let e = elements.eccentricity;
        let a = elements.semi_major_axis;
        let gm = elements.gm;

        let mean_anomaly = elements.mean_anomaly_at_epoch + elements.mean_motion * elapsed;
        let e_anomaly = solve_eccentric_anomaly(mean_anomaly, e, self.seed);
        let residual = (e_anomaly - e * e_anomaly.sin() - mean_anomaly).abs();

        let true_anomaly = eccentric_to_true_anomaly(e_anomaly, e);
        let radius = a * (1.0 - e * e_anomaly.cos());

        // Clockwise orbits sweep the true anomaly in the -z sense
        let sense = if elements.retrograde { -1.0 } else { 1.0 };
        let angle = elements.argument_of_periapsis + sense * true_anomaly;
        let (sin_a, cos_a) = angle.sin_cos();
        let radial = DVec3::new(cos_a, sin_a, 0.0);
        let tangential = DVec3::new(-sin_a, cos_a, 0.0);

        let position = radial * radius;

        // Perifocal velocity components: radial (μ/p)^½·e·sinθ, tangential (μ/p)^½·(1 + e·cosθ)
        let semi_latus_rectum = a * (1.0 - e * e);
        let k = (gm / semi_latus_rectum).sqrt();
        let v_radial = k * e * true_anomaly.sin();
        let v_tangential = k * (1.0 + e * true_anomaly.cos());
        let velocity = radial * v_radial + tangential * (sense * v_tangential);

        // Vis-viva
        let speed = (gm * (2.0 / radius - 1.0 / a)).sqrt();

        KeplerSample {
            position,
            velocity,
            speed,
            radius,
            true_anomaly,
            residual,
        }
    }
}
